// crates/resdata-behavior/src/capabilities.rs

bitflags::bitflags! {
    /// Interaction vocabulary a base behavior can grant.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u32 {
        const CAN_CLICK        = 1 << 0;
        const CAN_TOGGLE       = 1 << 1;
        const CAN_FOCUS        = 1 << 2;
        const CAN_TEXT_INPUT   = 1 << 3;
        const CAN_SELECT_ITEMS = 1 << 4;
        const CAN_SCROLL       = 1 << 5;
        const IS_CONTAINER     = 1 << 6;
        const HAS_TOOLTIP      = 1 << 7;
        const CUSTOM_BEHAVIOR  = 1 << 8;
    }
}

const CAPABILITY_NAMES: &[(Capabilities, &str)] = &[
    (Capabilities::CAN_CLICK, "CanClick"),
    (Capabilities::CAN_TOGGLE, "CanToggle"),
    (Capabilities::CAN_FOCUS, "CanFocus"),
    (Capabilities::CAN_TEXT_INPUT, "CanTextInput"),
    (Capabilities::CAN_SELECT_ITEMS, "CanSelectItems"),
    (Capabilities::CAN_SCROLL, "CanScroll"),
    (Capabilities::IS_CONTAINER, "IsContainer"),
    (Capabilities::HAS_TOOLTIP, "HasTooltip"),
    (Capabilities::CUSTOM_BEHAVIOR, "CustomBehavior"),
];

impl Capabilities {
    /// Names of every set capability, lowest bit first.
    pub fn names(self) -> Vec<String> {
        CAPABILITY_NAMES
            .iter()
            .filter(|(cap, _)| self.contains(*cap))
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_follow_bit_order() {
        let caps = Capabilities::HAS_TOOLTIP | Capabilities::CAN_CLICK | Capabilities::CAN_FOCUS;
        assert_eq!(caps.names(), vec!["CanClick", "CanFocus", "HasTooltip"]);
        assert!(Capabilities::empty().names().is_empty());
        assert_eq!(Capabilities::all().names().len(), 9);
    }
}
