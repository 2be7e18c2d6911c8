//! Plugin module exporting the `RandomAggressive` strategy.

sevens_engine::declare_strategy!(sevens_ai::random_aggressive::RandomAggressive::new);
