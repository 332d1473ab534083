use connect_four_uct::{BestChildCriteria, MCTSConfig, RolloutMode, SearchBudget};
use std::time::Duration;

#[test]
fn test_config_builder_methods() {
    // Test that all builder methods correctly set their respective values
    let config = MCTSConfig::default()
        .with_exploration_constant(2.0)
        .with_max_iterations(5000)
        .with_max_time(Duration::from_secs(30))
        .with_best_child_criteria(BestChildCriteria::Max)
        .with_rollout(RolloutMode::Random)
        .with_verbosity(3);

    assert_eq!(config.exploration_constant, 2.0);
    assert_eq!(config.max_iterations, Some(5000));
    assert_eq!(config.max_time, Some(Duration::from_secs(30)));
    assert_eq!(config.best_child_criteria, BestChildCriteria::Max);
    assert_eq!(config.rollout, RolloutMode::Random);
    assert_eq!(config.verbosity, 3);
    assert_eq!(
        config.budget(),
        SearchBudget::new(Some(Duration::from_secs(30)), Some(5000))
    );
}

#[test]
fn test_config_default_values() {
    let config = MCTSConfig::default();

    // Default exploration constant should be sqrt(2)
    assert!((config.exploration_constant - std::f64::consts::SQRT_2).abs() < 0.001);
    assert_eq!(config.max_time, Some(Duration::from_secs(5)));
    assert_eq!(config.max_iterations, None);
    assert_eq!(config.best_child_criteria, BestChildCriteria::Robust);
    assert_eq!(config.rollout, RolloutMode::WinSeeking);
    assert_eq!(config.verbosity, 1);
}

#[test]
fn test_non_positive_budgets_disable_the_limit() {
    let config = MCTSConfig::default()
        .with_time_budget_secs(0.0)
        .with_iteration_budget(-10);
    assert_eq!(config.max_time, None);
    assert_eq!(config.max_iterations, None);

    let config = MCTSConfig::default()
        .with_max_time(Duration::ZERO)
        .with_max_iterations(0);
    assert_eq!(config.max_time, None);
    assert_eq!(config.max_iterations, None);

    let config = MCTSConfig::default()
        .with_time_budget_secs(2.5)
        .with_iteration_budget(1000);
    assert_eq!(config.max_time, Some(Duration::from_millis(2500)));
    assert_eq!(config.max_iterations, Some(1000));
}
