// crates/resdata-runtime/src/project.rs

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use resdata_behavior::{BehaviorConfig, BehaviorEngine};
use resdata_core::{
    serialize_layout, Diagnostic, FlagTables, LayoutDecoder, ResdataError, Result, TokenStore,
    Tokenizer, WindowRecord,
};
use tracing::{debug, info};

use crate::{analyze_control_types, ControlTypeReport, TokensReadyListener};

/// One loaded `resdata.inc` file and everything derived from it.
///
/// A load runs the whole pipeline: tokenize into the shared store, notify
/// listeners, decode, then validate and resolve every record.
pub struct ResourceProject {
    store: Arc<TokenStore>,
    tokenizer: Tokenizer,
    engine: BehaviorEngine,
    windows: Vec<WindowRecord>,
    decode_diagnostics: Vec<Diagnostic>,
    validation_diagnostics: Vec<Diagnostic>,
    analysis: ControlTypeReport,
    listeners: Vec<Box<dyn TokensReadyListener>>,
}

impl ResourceProject {
    pub fn new(tables: FlagTables) -> Self {
        Self::with_store(Arc::new(TokenStore::new()), tables)
    }

    /// Uses a store shared with other collaborators.
    pub fn with_store(store: Arc<TokenStore>, tables: FlagTables) -> Self {
        Self {
            store,
            tokenizer: Tokenizer::new(),
            engine: BehaviorEngine::new(tables),
            windows: Vec::new(),
            decode_diagnostics: Vec::new(),
            validation_diagnostics: Vec::new(),
            analysis: ControlTypeReport::default(),
            listeners: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: BehaviorConfig) -> Self {
        self.engine.set_config(config);
        self
    }

    pub fn store(&self) -> Arc<TokenStore> {
        Arc::clone(&self.store)
    }

    pub fn engine(&self) -> &BehaviorEngine {
        &self.engine
    }

    pub fn windows(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn analysis(&self) -> &ControlTypeReport {
        &self.analysis
    }

    /// Decoder findings followed by validation findings.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.decode_diagnostics.iter().chain(self.validation_diagnostics.iter())
    }

    pub fn add_tokens_ready_listener(&mut self, listener: Box<dyn TokensReadyListener>) {
        self.listeners.push(listener);
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read resource file {}", path.display()))?;
        info!("Loading resource file {}", path.display());
        self.load_text(&text);
        Ok(())
    }

    /// Re-parses `text` from scratch. Never fails; anomalies become diagnostics.
    pub fn load_text(&mut self, text: &str) {
        let summary = self.tokenizer.tokenize_into(&self.store, text);
        debug!("Notifying {} tokens-ready listeners", self.listeners.len());
        for listener in &self.listeners {
            listener.on_tokens_ready(&self.store);
        }

        let mut decoder = LayoutDecoder::new();
        self.windows = decoder.decode(&self.store);
        self.decode_diagnostics = decoder.take_diagnostics();

        info!(
            "Loaded {} windows from {} token groups ({} tokens)",
            self.windows.len(),
            summary.windows,
            summary.tokens
        );
        self.process_layout();
    }

    /// Validates, refreshes the resolved masks and resolves behavior for every record.
    pub fn process_layout(&mut self) {
        let engine = &self.engine;
        let diagnostics = &mut self.validation_diagnostics;
        diagnostics.clear();

        for window in &mut self.windows {
            diagnostics.extend(engine.validate_window(window));
            engine.update_window_flags(window);
            window.behavior = engine.resolve_window(window);

            for control in &mut window.controls {
                diagnostics.extend(engine.validate_control(&window.name, control));
                engine.update_control_flags(control);
                control.behavior = engine.resolve_control(control);
            }
        }

        self.analysis = analyze_control_types(&self.windows);
        info!(
            "Layout processed: {} windows, {} validation findings",
            self.windows.len(),
            self.validation_diagnostics.len()
        );
    }

    /// Replaces the flag tables and recomputes every cached mask and descriptor.
    pub fn reload_flag_tables(&mut self, tables: FlagTables) {
        self.engine.set_tables(tables);
        self.process_layout();
    }

    pub fn load_flag_tables(
        &mut self,
        window_path: impl AsRef<Path>,
        control_path: impl AsRef<Path>,
    ) -> anyhow::Result<()> {
        let window_path = window_path.as_ref();
        let control_path = control_path.as_ref();
        let tables = FlagTables::load(window_path, control_path).with_context(|| {
            format!(
                "Failed to load flag tables {} / {}",
                window_path.display(),
                control_path.display()
            )
        })?;
        self.reload_flag_tables(tables);
        Ok(())
    }

    pub fn set_behavior_config(&mut self, config: BehaviorConfig) {
        self.engine.set_config(config);
        self.process_layout();
    }

    /// Case-insensitive lookup.
    pub fn find_window(&self, name: &str) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.is_named(name))
    }

    fn window_index(&self, name: &str) -> Result<usize> {
        self.windows
            .iter()
            .position(|w| w.is_named(name))
            .ok_or_else(|| ResdataError::WindowNotFound(name.to_string()))
    }

    fn control_index(&self, window_index: usize, control_id: &str) -> Result<usize> {
        let window = &self.windows[window_index];
        window
            .controls
            .iter()
            .position(|c| c.id == control_id)
            .ok_or_else(|| ResdataError::ControlNotFound {
                window: window.name.clone(),
                control: control_id.to_string(),
            })
    }

    pub fn set_window_flags(&mut self, window_name: &str, mask: u32) -> Result<()> {
        let index = self.window_index(window_name)?;
        let engine = &self.engine;
        let window = &mut self.windows[index];

        window.set_flags_mask(mask);
        engine.update_window_flags(window);
        window.behavior = engine.resolve_window(window);

        info!("Window {} flags set to {}", window.name, window.flags_hex);
        Ok(())
    }

    pub fn set_control_flags(&mut self, window_name: &str, control_id: &str, mask: u32) -> Result<()> {
        let window_index = self.window_index(window_name)?;
        let control_index = self.control_index(window_index, control_id)?;
        let engine = &self.engine;
        let control = &mut self.windows[window_index].controls[control_index];

        control.set_flags_mask(mask);
        engine.update_control_flags(control);
        control.behavior = engine.resolve_control(control);

        info!("Control {}/{} flags set to {}", window_name, control.id, control.flags_hex);
        Ok(())
    }

    /// Sets or clears one named window flag. Returns the new mask.
    pub fn toggle_window_flag(&mut self, window_name: &str, flag: &str, enable: bool) -> Result<u32> {
        let bit = self
            .engine
            .tables()
            .window
            .get(flag)
            .ok_or_else(|| ResdataError::UnknownFlag(flag.to_string()))?;
        let index = self.window_index(window_name)?;

        let mask = apply_bit(self.windows[index].flags_mask, bit, enable);
        self.set_window_flags(window_name, mask)?;
        Ok(mask)
    }

    /// Sets or clears one named control flag. Names missing from the control
    /// table are looked up in the window table, whose bits controls carry in
    /// their upper words. Returns the new mask.
    pub fn toggle_control_flag(
        &mut self,
        window_name: &str,
        control_id: &str,
        flag: &str,
        enable: bool,
    ) -> Result<u32> {
        let tables = self.engine.tables();
        let bit = tables
            .control
            .get(flag)
            .or_else(|| tables.window.get(flag))
            .ok_or_else(|| ResdataError::UnknownFlag(flag.to_string()))?;
        let window_index = self.window_index(window_name)?;
        let control_index = self.control_index(window_index, control_id)?;

        let current = self.windows[window_index].controls[control_index].flags_mask;
        let mask = apply_bit(current, bit, enable);
        self.set_control_flags(window_name, control_id, mask)?;
        Ok(mask)
    }

    /// Current layout as resource text.
    pub fn serialize(&self) -> String {
        serialize_layout(&self.store, &self.windows)
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.serialize())
            .with_context(|| format!("Failed to write resource file {}", path.display()))?;
        info!("Saved layout to {}", path.display());
        Ok(())
    }
}

fn apply_bit(mask: u32, bit: u32, enable: bool) -> u32 {
    if enable {
        mask | bit
    } else {
        mask & !bit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resdata_core::{DiagnosticKind, FlagTable, FlagWord};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const LAYOUT: &str = "\
APP_LOGIN \"WndTile00.tga\" \"\" 1 256 160 0x230000 26
{
    // Title String
    IDS_RESDATA_INC_000001
}
{
    WTYPE_BUTTON WIDC_OK \"ButtOk.tga\" 0 10 10 80 30 0x0 0 0 0 0
    WTYPE_EDIT WIDC_NAME \"\" 0 10 40 200 60 0x20 0 0 0 0
}
APP_MINIMAP \"\" \"\" 0 128 128 0x10 0
";

    fn tables() -> FlagTables {
        FlagTables::new(
            [
                ("WBS_MOVE", 0x0001_0000),
                ("WBS_MODAL", 0x0002_0000),
                ("WBS_CAPTION", 0x0020_0000),
                ("WBS_NOCLOSE", 0x0000_0080),
                ("WBS_NOCENTER", 0x0000_0080),
            ]
            .into_iter()
            .collect(),
            [("BS_AUTOCHECKBOX", 0x0003), ("ES_PASSWORD", 0x0020)]
                .into_iter()
                .collect::<FlagTable>(),
        )
    }

    fn project() -> ResourceProject {
        let mut project = ResourceProject::new(tables());
        project.load_text(LAYOUT);
        project
    }

    #[test]
    fn test_load_resolves_every_record() {
        let project = project();
        assert_eq!(project.windows().len(), 2);

        let login = project.find_window("app_login").unwrap();
        assert_eq!(login.behavior.category, "window");
        assert_eq!(login.resolved_mask, vec!["movable", "modal", "has_caption", "has_frame", "has_close"]);

        let name = login.find_control("WIDC_NAME").unwrap();
        assert_eq!(name.behavior.category, "edit");
        assert!(name.behavior.flag("password"));
        assert_eq!(name.resolved_mask, vec!["ES_PASSWORD"]);

        let minimap = project.find_window("APP_MINIMAP").unwrap();
        assert_eq!(minimap.flags_mask, 0x0010_0000);
        assert!(!minimap.resolved_mask.contains(&"has_close".to_string()));
    }

    #[test]
    fn test_diagnostics_cover_decode_and_validation() {
        let project = project();
        let kinds: Vec<&DiagnosticKind> = project.diagnostics().map(|d| &d.kind).collect();

        assert!(matches!(kinds[0], DiagnosticKind::AutoFixedWindowFlags { original: 0x10, .. }));
        assert!(kinds.iter().any(|k| matches!(
            k,
            DiagnosticKind::UnknownFlagBits { word: FlagWord::Full, bits: 0x0010_0000 }
        )));
    }

    #[test]
    fn test_toggle_window_flag_refreshes_cache() {
        let mut project = project();

        let mask = project.toggle_window_flag("APP_LOGIN", "WBS_NOCLOSE", true).unwrap();
        assert_eq!(mask, 0x0023_0080);

        let login = project.find_window("APP_LOGIN").unwrap();
        assert_eq!(login.flags_hex, "0x230080");
        assert!(!login.resolved_mask.contains(&"has_close".to_string()));
        assert!(!login.behavior.flag("hasCloseButton"));

        let mask = project.toggle_window_flag("APP_LOGIN", "WBS_MOVE", false).unwrap();
        assert_eq!(mask, 0x0022_0080);
        assert!(!project.find_window("APP_LOGIN").unwrap().behavior.flag("movable"));
    }

    #[test]
    fn test_toggle_control_flag_refreshes_cache() {
        let mut project = project();

        let mask = project.toggle_control_flag("APP_LOGIN", "WIDC_OK", "BS_AUTOCHECKBOX", true).unwrap();
        assert_eq!(mask, 0x3);

        let ok = project.find_window("APP_LOGIN").unwrap().find_control("WIDC_OK").unwrap();
        assert_eq!(ok.low_flags, 0x3);
        assert_eq!(ok.behavior.category, "checkbox");
        assert_eq!(ok.resolved_mask, vec!["BS_AUTOCHECKBOX"]);

        let mask = project.toggle_control_flag("APP_LOGIN", "WIDC_OK", "WBS_MOVE", true).unwrap();
        assert_eq!(mask, 0x0001_0003);
    }

    #[test]
    fn test_edits_reject_unknown_names() {
        let mut project = project();

        assert!(matches!(
            project.set_window_flags("APP_NOPE", 0),
            Err(ResdataError::WindowNotFound(_))
        ));
        assert!(matches!(
            project.set_control_flags("APP_LOGIN", "WIDC_NOPE", 0),
            Err(ResdataError::ControlNotFound { .. })
        ));
        assert!(matches!(
            project.toggle_window_flag("APP_LOGIN", "WBS_NOPE", true),
            Err(ResdataError::UnknownFlag(_))
        ));
    }

    #[test]
    fn test_reloading_tables_recomputes_caches() {
        let mut project = project();
        assert!(project.find_window("APP_LOGIN").unwrap().behavior.flag("modal"));

        let mut reduced = tables();
        reduced.window = [("WBS_MOVE", 0x0001_0000)].into_iter().collect();
        project.reload_flag_tables(reduced);

        let login = project.find_window("APP_LOGIN").unwrap();
        assert!(!login.behavior.flag("modal"));
        assert_eq!(login.resolved_mask, vec!["movable", "no_caption", "has_frame", "has_close"]);
    }

    #[test]
    fn test_listeners_see_fresh_tokens() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);

        let mut project = ResourceProject::new(tables());
        project.add_tokens_ready_listener(Box::new(move |store: &TokenStore| {
            counter.store(store.window_count(), Ordering::SeqCst);
        }));
        project.load_text(LAYOUT);

        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_serialize_reflects_edits() {
        let mut project = project();
        project.set_control_flags("APP_LOGIN", "WIDC_NAME", 0x1).unwrap();

        let text = project.serialize();
        assert!(text.contains("    WTYPE_EDIT WIDC_NAME \"\" 0 10 40 200 60 0x1 0 0 0 0 255 255 255\r\n"));
        assert!(text.contains("APP_MINIMAP \"\" \"\" 0 128 128 0x10 0\r\n"));
    }
}
