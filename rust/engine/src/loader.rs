//! Runtime loading of strategies from shared libraries.
//!
//! A strategy module is a `cdylib` exporting [`FACTORY_SYMBOL`] (see
//! [`declare_strategy!`](crate::declare_strategy)). Modules and the host must
//! be built with the same compiler and the same `sevens-engine` version, since
//! the factory hands back a Rust trait object.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Arc;

use libloading::Library;
use tracing::{debug, info};

use crate::cards::Card;
use crate::errors::LoadError;
use crate::player::PlayerId;
use crate::strategy::{Strategy, StrategyFactory, StrategyHandle, FACTORY_SYMBOL};
use crate::table::Table;

/// A strategy instance together with the module its code lives in.
pub struct LoadedStrategy {
    // Field order matters: the instance is dropped before the module
    // reference, so its destructor still has code to run.
    inner: Box<dyn Strategy>,
    module: Arc<Library>,
    path: PathBuf,
}

impl LoadedStrategy {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn module_refs(&self) -> usize {
        Arc::strong_count(&self.module)
    }
}

impl std::fmt::Debug for LoadedStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedStrategy")
            .field("name", &self.inner.name())
            .field("path", &self.path)
            .finish()
    }
}

impl Strategy for LoadedStrategy {
    fn initialize(&mut self, me: PlayerId) {
        self.inner.initialize(me)
    }

    fn select_card_to_play(&mut self, hand: &[Card], table: &Table) -> Option<usize> {
        self.inner.select_card_to_play(hand, table)
    }

    fn observe_move(&mut self, player: PlayerId, card: Card) {
        self.inner.observe_move(player, card)
    }

    fn observe_pass(&mut self, player: PlayerId) {
        self.inner.observe_pass(player)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Opens strategy modules and keeps them registered by path.
///
/// Loading the same path twice reuses the open module and yields a fresh
/// instance each time. Dropping the loader releases its registrations only;
/// modules stay mapped while any strategy created from them is alive.
#[derive(Default)]
pub struct StrategyLoader {
    modules: HashMap<PathBuf, Arc<Library>>,
}

impl StrategyLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct modules currently registered.
    pub fn loaded_modules(&self) -> usize {
        self.modules.len()
    }

    /// Loads a strategy from the module at `path` and wraps it in a handle.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<StrategyHandle, LoadError> {
        let loaded = self.load_strategy(path)?;
        Ok(Rc::new(RefCell::new(loaded)))
    }

    pub fn load_strategy(&mut self, path: impl AsRef<Path>) -> Result<LoadedStrategy, LoadError> {
        let path = path.as_ref().to_path_buf();
        let (module, fresh) = match self.modules.get(&path) {
            Some(module) => (Arc::clone(module), false),
            None => (Arc::new(open_module(&path)?), true),
        };

        let inner = instantiate(&module, &path)?;
        if fresh {
            self.modules.insert(path.clone(), Arc::clone(&module));
        }
        info!(path = %path.display(), strategy = inner.name(), "strategy loaded");

        Ok(LoadedStrategy {
            inner,
            module,
            path,
        })
    }
}

fn open_module(path: &Path) -> Result<Library, LoadError> {
    debug!(path = %path.display(), "opening strategy module");
    // SAFETY: opening a library runs its initialisers; strategy modules are
    // trusted code supplied by the operator.
    unsafe { Library::new(path) }.map_err(|source| LoadError::ModuleNotFound {
        path: path.to_path_buf(),
        source,
    })
}

fn instantiate(module: &Library, path: &Path) -> Result<Box<dyn Strategy>, LoadError> {
    // SAFETY: the symbol type matches the signature generated by
    // `declare_strategy!`.
    let factory = unsafe { module.get::<StrategyFactory>(FACTORY_SYMBOL.as_bytes()) }.map_err(
        |source| LoadError::EntryPointMissing {
            path: path.to_path_buf(),
            symbol: FACTORY_SYMBOL,
            source,
        },
    )?;

    // SAFETY: see above; the module stays open for the duration of the call.
    let raw = unsafe { factory() };
    if raw.is_null() {
        return Err(LoadError::InstantiationFailed {
            path: path.to_path_buf(),
        });
    }
    // SAFETY: non-null pointers returned by the factory come from Box::into_raw.
    let boxed = unsafe { Box::from_raw(raw) };
    Ok(*boxed)
}
