//! ElementRegistry - descriptor and behaviour table keyed by element.
//!
//! One entry per `ElementKind`. The registry is the only place particles are
//! built from defaults, and the read-only introspection surface the UI uses.

use crate::core::error::RegistryError;
use crate::core::utils::color::{to_hex, vary};
use crate::core::utils::random::Rng;
use crate::systems::behaviors::{self, ElementBehavior};

use super::elements::{Category, ElementDescriptor, ElementKind, UI_GROUPS};
use super::particle::Particle;

const UNKNOWN_COLOR: &str = "#FFFFFF";

pub struct ElementRegistry {
    behaviors: Vec<Option<Box<dyn ElementBehavior>>>,
    descriptors: Vec<Option<ElementDescriptor>>,
    order: Vec<ElementKind>,
}

impl ElementRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self {
            behaviors: (0..ElementKind::COUNT).map(|_| None).collect(),
            descriptors: vec![None; ElementKind::COUNT],
            order: Vec::with_capacity(ElementKind::COUNT),
        }
    }

    /// Registry holding the whole built-in catalogue
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for behavior in behaviors::builtin() {
            if let Err(err) = registry.register(behavior) {
                log::warn!("builtin registration skipped: {err}");
            }
        }
        registry
    }

    pub fn register(&mut self, behavior: Box<dyn ElementBehavior>) -> Result<(), RegistryError> {
        let desc = behavior.descriptor();
        let i = desc.kind.index();
        if self.descriptors[i].is_some() {
            return Err(RegistryError::DuplicateElement(desc.name));
        }
        self.descriptors[i] = Some(desc);
        self.behaviors[i] = Some(behavior);
        self.order.push(desc.kind);
        Ok(())
    }

    #[inline]
    pub fn behavior(&self, kind: ElementKind) -> Option<&dyn ElementBehavior> {
        self.behaviors[kind.index()].as_deref()
    }

    #[inline]
    pub fn descriptor(&self, kind: ElementKind) -> Option<&ElementDescriptor> {
        self.descriptors[kind.index()].as_ref()
    }

    #[inline]
    pub fn is_registered(&self, kind: ElementKind) -> bool {
        self.descriptors[kind.index()].is_some()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn kinds(&self) -> &[ElementKind] {
        &self.order
    }

    pub fn get_element(&self, name: &str) -> Option<&ElementDescriptor> {
        ElementKind::from_name(name).and_then(|k| self.descriptor(k))
    }

    /// Names in registration order
    pub fn get_element_names(&self) -> Vec<&'static str> {
        self.order.iter().map(|k| k.name()).collect()
    }

    pub fn get_element_color(&self, name: &str) -> String {
        self.get_element(name)
            .map(|d| to_hex(d.default_color))
            .unwrap_or_else(|| UNKNOWN_COLOR.to_string())
    }

    /// The one post-registration patch the loader is allowed
    pub fn set_category(&mut self, kind: ElementKind, category: Category) -> bool {
        match self.descriptors[kind.index()].as_mut() {
            Some(desc) => {
                desc.category = category;
                true
            }
            None => false,
        }
    }

    /// Fresh particle with defaults, colour variance and element-specific state
    pub fn create(&self, kind: ElementKind, rng: &mut Rng) -> Option<Particle> {
        let desc = self.descriptor(kind)?;
        let behavior = self.behavior(kind)?;
        let mut particle = Particle::new(desc);
        particle.color = vary(desc.default_color, desc.color_variation, rng);
        behavior.on_create(&mut particle, rng);
        Some(particle)
    }

    pub fn create_element(&self, name: &str, rng: &mut Rng) -> Option<Particle> {
        match ElementKind::from_name(name) {
            Some(kind) if self.is_registered(kind) => self.create(kind, rng),
            _ => {
                log::warn!("unknown element '{name}'");
                None
            }
        }
    }

    /// Static UI grouping, filtered to what is registered
    pub fn get_elements_by_category(&self, group: &str) -> Vec<&'static str> {
        let Some((_, names)) = UI_GROUPS.iter().find(|(g, _)| *g == group) else {
            return Vec::new();
        };
        if group == "environmental" {
            return names.to_vec();
        }
        names
            .iter()
            .copied()
            .filter(|n| ElementKind::from_name(n).is_some_and(|k| self.is_registered(k)))
            .collect()
    }

    pub fn categories(&self) -> Vec<&'static str> {
        UI_GROUPS.iter().map(|(g, _)| *g).collect()
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
