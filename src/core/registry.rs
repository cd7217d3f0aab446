//! Capability registry.
//!
//! Each capability the engine consumes has a fixed identity in
//! [`CapabilityId`]. A recipe is stored per identity; resolving a capability
//! first resolves the recipe's declared dependencies from the same registry.

use crate::domain::chart::RenderOptions;
use crate::domain::ports::{ChartRenderer, DataExtractor};
use crate::utils::error::{ChartError, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapabilityId {
    DataExtractor,
    ChartRenderer,
    RenderOptions,
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapabilityId::DataExtractor => "DataExtractor",
            CapabilityId::ChartRenderer => "ChartRenderer",
            CapabilityId::RenderOptions => "RenderOptions",
        };
        f.write_str(name)
    }
}

/// A resolved value of any registered capability.
pub enum Instance {
    Extractor(Box<dyn DataExtractor>),
    Renderer(Box<dyn ChartRenderer>),
    Options(RenderOptions),
}

pub trait Capability: Sized + 'static {
    const ID: CapabilityId;

    fn into_instance(self) -> Instance;

    fn from_instance(instance: Instance) -> Option<Self>;
}

impl Capability for Box<dyn DataExtractor> {
    const ID: CapabilityId = CapabilityId::DataExtractor;

    fn into_instance(self) -> Instance {
        Instance::Extractor(self)
    }

    fn from_instance(instance: Instance) -> Option<Self> {
        match instance {
            Instance::Extractor(extractor) => Some(extractor),
            _ => None,
        }
    }
}

impl Capability for Box<dyn ChartRenderer> {
    const ID: CapabilityId = CapabilityId::ChartRenderer;

    fn into_instance(self) -> Instance {
        Instance::Renderer(self)
    }

    fn from_instance(instance: Instance) -> Option<Self> {
        match instance {
            Instance::Renderer(renderer) => Some(renderer),
            _ => None,
        }
    }
}

impl Capability for RenderOptions {
    const ID: CapabilityId = CapabilityId::RenderOptions;

    fn into_instance(self) -> Instance {
        Instance::Options(self)
    }

    fn from_instance(instance: Instance) -> Option<Self> {
        match instance {
            Instance::Options(options) => Some(options),
            _ => None,
        }
    }
}

/// A tuple of capabilities a recipe needs before it can run.
pub trait Dependencies: Sized {
    fn resolve_from(registry: &Registry) -> Result<Self>;
}

impl Dependencies for () {
    fn resolve_from(_registry: &Registry) -> Result<Self> {
        Ok(())
    }
}

macro_rules! impl_dependencies {
    ($($dep:ident),+) => {
        impl<$($dep: Capability),+> Dependencies for ($($dep,)+) {
            fn resolve_from(registry: &Registry) -> Result<Self> {
                Ok(($(registry.resolve::<$dep>()?,)+))
            }
        }
    };
}

impl_dependencies!(A);
impl_dependencies!(A, B);
impl_dependencies!(A, B, C);

type Recipe = Box<dyn Fn(&Registry) -> Result<Instance>>;

#[derive(Default)]
pub struct Registry {
    recipes: HashMap<CapabilityId, Recipe>,
    resolving: RefCell<Vec<CapabilityId>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<C: Capability>(&mut self, recipe: impl Fn() -> C + 'static) {
        self.register_with(move |()| recipe());
    }

    /// Stores `recipe` for `C`, replacing any earlier one. `D` is resolved
    /// from this registry each time `C` is resolved.
    pub fn register_with<C, D>(&mut self, recipe: impl Fn(D) -> C + 'static)
    where
        C: Capability,
        D: Dependencies + 'static,
    {
        let recipe: Recipe = Box::new(move |registry: &Registry| {
            let deps = D::resolve_from(registry)?;
            Ok(recipe(deps).into_instance())
        });

        if self.recipes.insert(C::ID, recipe).is_some() {
            tracing::debug!("Replaced recipe for {}", C::ID);
        } else {
            tracing::debug!("Registered recipe for {}", C::ID);
        }
    }

    pub fn register_instance<C: Capability + Clone>(&mut self, value: C) {
        self.register(move || value.clone());
    }

    pub fn resolve<C: Capability>(&self) -> Result<C> {
        let recipe = self
            .recipes
            .get(&C::ID)
            .ok_or_else(|| ChartError::UnregisteredCapability {
                capability: C::ID.to_string(),
            })?;

        {
            let mut resolving = self.resolving.borrow_mut();
            if resolving.contains(&C::ID) {
                return Err(ChartError::CyclicDependency {
                    capability: C::ID.to_string(),
                });
            }
            resolving.push(C::ID);
        }

        let instance = recipe(self);
        self.resolving.borrow_mut().pop();

        C::from_instance(instance?).ok_or_else(|| ChartError::UnregisteredCapability {
            capability: C::ID.to_string(),
        })
    }

    pub fn is_registered<C: Capability>(&self) -> bool {
        self.recipes.contains_key(&C::ID)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::extractors::CsvDataExtractor;
    use crate::adapters::renderers::{BarChartRenderer, PieChartRenderer};
    use crate::domain::model::{ChartKind, ExtractorKind};

    #[test]
    fn test_resolve_unregistered_capability() {
        let registry = Registry::new();
        let result = registry.resolve::<Box<dyn ChartRenderer>>();
        assert!(matches!(
            result,
            Err(ChartError::UnregisteredCapability { ref capability }) if capability == "ChartRenderer"
        ));
    }

    #[test]
    fn test_register_and_resolve_without_dependencies() {
        let mut registry = Registry::new();
        registry.register::<Box<dyn DataExtractor>>(|| Box::new(CsvDataExtractor));

        let extractor = registry.resolve::<Box<dyn DataExtractor>>().unwrap();
        assert_eq!(extractor.kind(), ExtractorKind::Csv);
        assert!(registry.is_registered::<Box<dyn DataExtractor>>());
        assert!(!registry.is_registered::<Box<dyn ChartRenderer>>());
    }

    #[test]
    fn test_dependencies_are_resolved_recursively() {
        let mut registry = Registry::new();
        registry.register_instance(RenderOptions {
            animation: false,
            antialiasing: true,
        });
        registry.register_with(|(options,): (RenderOptions,)| {
            Box::new(PieChartRenderer::new(options)) as Box<dyn ChartRenderer>
        });

        let renderer = registry.resolve::<Box<dyn ChartRenderer>>().unwrap();
        assert_eq!(renderer.kind(), ChartKind::Pie);
        assert!(!renderer.options().animation);
    }

    #[test]
    fn test_missing_transitive_dependency_is_reported() {
        let mut registry = Registry::new();
        registry.register_with(|(options,): (RenderOptions,)| {
            Box::new(PieChartRenderer::new(options)) as Box<dyn ChartRenderer>
        });

        let err = registry.resolve::<Box<dyn ChartRenderer>>().err().unwrap();
        assert!(matches!(
            err,
            ChartError::UnregisteredCapability { ref capability } if capability == "RenderOptions"
        ));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = Registry::new();
        registry.register_instance(RenderOptions::default());
        registry.register_with(|(options,): (RenderOptions,)| {
            Box::new(PieChartRenderer::new(options)) as Box<dyn ChartRenderer>
        });
        registry.register_with(|(options,): (RenderOptions,)| {
            Box::new(BarChartRenderer::new(options)) as Box<dyn ChartRenderer>
        });

        assert_eq!(registry.len(), 2);
        let renderer = registry.resolve::<Box<dyn ChartRenderer>>().unwrap();
        assert_eq!(renderer.kind(), ChartKind::Bar);
    }

    #[test]
    fn test_registering_twice_matches_registering_once() {
        let recipe = |(options,): (RenderOptions,)| {
            Box::new(PieChartRenderer::new(options)) as Box<dyn ChartRenderer>
        };

        let mut once = Registry::new();
        once.register_instance(RenderOptions::default());
        once.register_with(recipe);

        let mut twice = Registry::new();
        twice.register_instance(RenderOptions::default());
        twice.register_with(recipe);
        twice.register_with(recipe);

        assert_eq!(once.len(), twice.len());
        let series = vec![crate::domain::model::DataPoint::new("a", 1.0)];
        let a = once.resolve::<Box<dyn ChartRenderer>>().unwrap().configure(&series);
        let b = twice.resolve::<Box<dyn ChartRenderer>>().unwrap().configure(&series);
        assert_eq!(a, b);
    }

    #[test]
    fn test_cyclic_dependency_is_an_error() {
        let mut registry = Registry::new();
        registry.register_with(|(_renderer,): (Box<dyn ChartRenderer>,)| RenderOptions::default());
        registry.register_with(|(options,): (RenderOptions,)| {
            Box::new(BarChartRenderer::new(options)) as Box<dyn ChartRenderer>
        });

        let err = registry.resolve::<RenderOptions>().err().unwrap();
        assert!(matches!(err, ChartError::CyclicDependency { .. }));

        // The guard is released after a failed resolution.
        registry.register_instance(RenderOptions::default());
        assert!(registry.resolve::<Box<dyn ChartRenderer>>().is_ok());
    }

    #[test]
    fn test_capability_identity_is_stable() {
        assert_eq!(<Box<dyn ChartRenderer> as Capability>::ID, CapabilityId::ChartRenderer);
        assert_eq!(<Box<dyn DataExtractor> as Capability>::ID.to_string(), "DataExtractor");
        assert_ne!(
            <Box<dyn DataExtractor> as Capability>::ID,
            <RenderOptions as Capability>::ID
        );
    }
}
