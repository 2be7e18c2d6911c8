//! Plugin module exporting the `Prudent` strategy.

sevens_engine::declare_strategy!(sevens_ai::prudent::Prudent::new);
