// crates/resdata-behavior/src/engine.rs

use resdata_core::{
    AttributeValue, BehaviorDescriptor, ControlRecord, Diagnostic, FlagTables, WindowRecord,
};
use tracing::debug;

use crate::{
    apply_window_style, derive_combined_behavior, normalize_type, resolve_control_semantic,
    resolve_window_semantic, validate_control, validate_window, BaseBehaviorRegistry,
    BehaviorConfig,
};

/// Category used when a normalized key has no base behavior.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Resolves behavior descriptors and resolved masks from flag tables.
///
/// Resolution is read-only on the records. Only the `update_*` methods
/// write back, and only the cached `resolved_mask`.
#[derive(Debug, Clone, Default)]
pub struct BehaviorEngine {
    tables: FlagTables,
    registry: BaseBehaviorRegistry,
    config: BehaviorConfig,
}

impl BehaviorEngine {
    pub fn new(tables: FlagTables) -> Self {
        Self {
            tables,
            registry: BaseBehaviorRegistry::builtin(),
            config: BehaviorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_registry(mut self, registry: BaseBehaviorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn tables(&self) -> &FlagTables {
        &self.tables
    }

    /// Swaps the flag tables. Every cached mask and descriptor is stale afterwards.
    pub fn set_tables(&mut self, tables: FlagTables) {
        self.tables = tables;
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BehaviorConfig) {
        self.config = config;
    }

    pub fn registry(&self) -> &BaseBehaviorRegistry {
        &self.registry
    }

    pub fn resolve_control(&self, control: &ControlRecord) -> BehaviorDescriptor {
        let normalized = normalize_type(&control.r#type);
        let mut descriptor = BehaviorDescriptor::new(UNKNOWN_CATEGORY);

        if let Some(base) = self.registry.get(normalized) {
            descriptor.category = base.category.clone();
            descriptor.attributes.extend(base.defaults.clone());
            descriptor.attributes.insert(
                "capabilities".to_string(),
                AttributeValue::List(base.capabilities.names()),
            );
        }

        if let Some(overrides) = self.config.overrides_for(normalized) {
            descriptor.attributes.extend(overrides.clone());
        }

        let semantic = resolve_control_semantic(control, &self.tables.control);
        descriptor.attributes.extend(semantic.clone());

        let engine_type = control.r#type.trim().to_ascii_uppercase();
        let mut combined = derive_combined_behavior(&engine_type, normalized, &semantic);
        if let Some(AttributeValue::String(category)) = combined.get("category") {
            descriptor.category = category.clone();
        }
        descriptor.attributes.extend(combined);

        let attributes = &mut descriptor.attributes;
        let enabled = attributes.get("enabled").and_then(AttributeValue::as_bool) != Some(false);
        let visible = attributes.get("visible").and_then(AttributeValue::as_bool).unwrap_or(true);
        attributes.insert("id".to_string(), control.id.clone().into());
        attributes.insert("type".to_string(), normalized.into());
        attributes.insert("color".to_string(), control.color.into());
        attributes.insert("enabled".to_string(), enabled.into());
        attributes.insert("visible".to_string(), visible.into());

        debug!(
            "Resolved control {} ({} -> {}) as {}",
            control.id, control.r#type, normalized, descriptor.category
        );
        descriptor
    }

    pub fn resolve_window(&self, window: &WindowRecord) -> BehaviorDescriptor {
        let mut descriptor = BehaviorDescriptor::new("window");
        let attributes = &mut descriptor.attributes;

        for tag in apply_window_style(window, &self.tables.window) {
            attributes.insert(tag, true.into());
        }
        attributes.extend(resolve_window_semantic(window, &self.tables.window));

        attributes.insert("name".to_string(), window.name.clone().into());
        attributes.entry("enabled".to_string()).or_insert_with(|| true.into());
        attributes.entry("visible".to_string()).or_insert_with(|| true.into());

        descriptor
    }

    /// Tags the window mask resolves to, without touching the record.
    pub fn apply_window_style(&self, window: &WindowRecord) -> Vec<String> {
        apply_window_style(window, &self.tables.window)
    }

    /// Rebuilds `resolved_mask` from the current mask.
    pub fn update_window_flags(&self, window: &mut WindowRecord) {
        window.resolved_mask = apply_window_style(window, &self.tables.window);
    }

    /// Rebuilds `resolved_mask` from the low word, in control-table order.
    pub fn update_control_flags(&self, control: &mut ControlRecord) {
        control.resolved_mask = self.tables.control.names_set_in(control.low_flags);
    }

    pub fn validate_window(&self, window: &WindowRecord) -> Vec<Diagnostic> {
        validate_window(window, &self.tables)
    }

    pub fn validate_control(&self, window_name: &str, control: &ControlRecord) -> Vec<Diagnostic> {
        validate_control(window_name, control, &self.tables)
    }
}
