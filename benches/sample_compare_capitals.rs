use std::path::Path;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use capitals::astar::AStarSearch;
use capitals::cost::Miles;
use capitals::greedy::GreedySearch;
use capitals::problem::Problem;
use capitals::states::StateCode;
use capitals::states::read_driving_distances;
use capitals::states::read_straight_line;

/// Start states, near to far from the Sacramento goal.
const INITIAL_STATES: [&str; 4] = ["NV", "CO", "MO", "IN"];

fn compare_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("Capitals Search");

    let graph = read_driving_distances(Path::new("data/driving.csv")).unwrap();
    let heuristics = read_straight_line(Path::new("data/straightline.csv")).unwrap();
    let goal: StateCode = "CA".parse().unwrap();

    for initial in INITIAL_STATES {
        let initial: StateCode = initial.parse().unwrap();
        let problem =
            Problem::<StateCode, Miles>::new(initial, goal, graph.clone(), heuristics.clone())
                .unwrap();

        let mut astar_search = AStarSearch::new(problem.clone());
        if let Some(path) = astar_search.find_goal() {
            println!("A* path: {} stops. Path: {}", path.num_stops(), path);
        }
        astar_search.print_memory_stats();

        let mut greedy_search = GreedySearch::new(problem.clone());
        if let Some(path) = greedy_search.find_goal() {
            println!("Greedy path: {} stops. Path: {}", path.num_stops(), path);
        }
        greedy_search.print_memory_stats();

        group.bench_with_input(BenchmarkId::new("A*", initial), &problem, |b, p| {
            b.iter(|| AStarSearch::run(p.clone()))
        });
        group.bench_with_input(BenchmarkId::new("Greedy", initial), &problem, |b, p| {
            b.iter(|| GreedySearch::run(p.clone()))
        });
    }
    group.finish();
}

criterion_group!(benches, compare_search);
criterion_main!(benches);
