//! Plugin module exporting the `Sentinel7` strategy.

sevens_engine::declare_strategy!(sevens_ai::sentinel::Sentinel::new);
