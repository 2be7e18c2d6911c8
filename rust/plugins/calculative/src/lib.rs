//! Plugin module exporting the `Calculative` strategy.

sevens_engine::declare_strategy!(sevens_ai::calculative::Calculative::new);
