// crates/resdata-behavior/src/base.rs

use std::collections::HashMap;

use resdata_core::{AttributeMap, AttributeValue};

use crate::Capabilities;

/// Static starting point for every control of one canonical behavior key.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseBehavior {
    pub category: String,
    pub capabilities: Capabilities,
    pub defaults: AttributeMap,
}

impl BaseBehavior {
    pub fn new(category: &str, capabilities: Capabilities) -> Self {
        Self {
            category: category.to_string(),
            capabilities,
            defaults: AttributeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.defaults.insert(key.to_string(), value.into());
        self
    }
}

/// Canonical behavior key -> base behavior.
#[derive(Debug, Clone)]
pub struct BaseBehaviorRegistry {
    behaviors: HashMap<String, BaseBehavior>,
}

impl Default for BaseBehaviorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl BaseBehaviorRegistry {
    pub fn empty() -> Self {
        Self {
            behaviors: HashMap::new(),
        }
    }

    /// The fixed table every engine starts from.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();

        registry.insert("base", BaseBehavior::new("base", Capabilities::empty()));

        registry.insert(
            "label",
            BaseBehavior::new("label", Capabilities::empty())
                .with("textSupport", true)
                .with("textAlign", "left")
                .with("imageMode", "none"),
        );

        registry.insert(
            "button",
            BaseBehavior::new(
                "button",
                Capabilities::CAN_CLICK | Capabilities::CAN_FOCUS | Capabilities::HAS_TOOLTIP,
            )
            .with("textSupport", true)
            .with("defaultState", "normal"),
        );

        registry.insert(
            "edit",
            BaseBehavior::new(
                "textinput",
                Capabilities::CAN_TEXT_INPUT | Capabilities::CAN_FOCUS | Capabilities::CAN_SCROLL,
            )
            .with("textSupport", true)
            .with("multiline", false)
            .with("password", false)
            .with("readonly", false)
            .with("textAlign", "left")
            .with("maxLength", 128),
        );

        registry.insert(
            "listbox",
            BaseBehavior::new(
                "list",
                Capabilities::CAN_SELECT_ITEMS | Capabilities::CAN_SCROLL | Capabilities::CAN_FOCUS,
            )
            .with("multiSelect", false)
            .with("sorted", false),
        );

        registry.insert(
            "combobox",
            BaseBehavior::new(
                "combobox",
                Capabilities::CAN_SELECT_ITEMS
                    | Capabilities::CAN_SCROLL
                    | Capabilities::CAN_FOCUS
                    | Capabilities::CAN_CLICK,
            )
            .with("editable", false)
            .with("dropDownSize", 8),
        );

        registry.insert(
            "tree",
            BaseBehavior::new(
                "tree",
                Capabilities::CAN_SELECT_ITEMS
                    | Capabilities::CAN_SCROLL
                    | Capabilities::CAN_FOCUS
                    | Capabilities::IS_CONTAINER
                    | Capabilities::CAN_TOGGLE,
            )
            .with("multiSelect", false),
        );

        registry.insert(
            "tab",
            BaseBehavior::new(
                "tab",
                Capabilities::CAN_SELECT_ITEMS
                    | Capabilities::CAN_CLICK
                    | Capabilities::CAN_FOCUS
                    | Capabilities::IS_CONTAINER,
            )
            .with("hasTabs", true),
        );

        registry.insert(
            "scrollbar",
            BaseBehavior::new("scrollbar", Capabilities::CAN_SCROLL | Capabilities::CAN_FOCUS)
                .with("orientation", "vertical"),
        );

        registry.insert(
            "progress",
            BaseBehavior::new("progress", Capabilities::empty())
                .with("min", 0)
                .with("max", 100)
                .with("value", 0),
        );

        registry.insert(
            "groupbox",
            BaseBehavior::new("groupbox", Capabilities::IS_CONTAINER).with("textSupport", true),
        );

        registry.insert("custom", BaseBehavior::new("custom", Capabilities::CUSTOM_BEHAVIOR));

        registry
    }

    pub fn insert(&mut self, key: &str, behavior: BaseBehavior) {
        self.behaviors.insert(key.to_string(), behavior);
    }

    pub fn get(&self, key: &str) -> Option<&BaseBehavior> {
        self.behaviors.get(key)
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}
