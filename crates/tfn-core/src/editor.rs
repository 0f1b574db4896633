//! Transfer-function editing session.
//!
//! [`TransferFunctionEditor`] owns every known function (presets, loaded and
//! caller-added), the index of the current one, the value ranges and the
//! dirty flag. All mutation goes through it so every edit marks the session
//! dirty; [`TransferFunctionEditor::render`] samples the current function and
//! commits it to the sink once per dirty→clean transition.
//!
//! Single-threaded by contract. A multi-threaded host must serialize all
//! access to one editor.

use crate::config::EditorConfig;
use crate::error::TfnError;
use crate::function::{LoadedFunction, TransferFunction, ValueRange};
use crate::points::{ColorPoint, OpacityPoint};
use crate::presets;
use crate::sampling::table::SampledTable;
use crate::sink::CommitSink;

/// Editing session over a registry of transfer functions.
#[derive(Debug)]
pub struct TransferFunctionEditor<S> {
    config: EditorConfig,
    sink: S,
    functions: Vec<TransferFunction>,
    /// Index into `functions`. Always valid: the registry only grows.
    selection: usize,
    value_range: ValueRange,
    default_range: ValueRange,
    dirty: bool,
    palette: Option<SampledTable>,
}

impl<S: CommitSink> TransferFunctionEditor<S> {
    /// Create an editor seeded with the built-in presets, the first one
    /// selected. The editor starts dirty so the first `render` commits.
    pub fn new(config: EditorConfig, sink: S) -> Result<Self, TfnError> {
        let functions = presets::builtins()
            .iter()
            .map(|preset| preset.instantiate(config.editable_threshold))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            sink,
            functions,
            selection: 0,
            value_range: ValueRange::default(),
            default_range: ValueRange::default(),
            dirty: true,
            palette: None,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    // ── Registry ─────────────────────────────────────────────────

    /// All functions, in menu order.
    pub fn functions(&self) -> &[TransferFunction] {
        &self.functions
    }

    /// Function names, in menu order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(TransferFunction::name)
    }

    pub fn current_index(&self) -> usize {
        self.selection
    }

    /// The selected function.
    pub fn current(&self) -> &TransferFunction {
        &self.functions[self.selection]
    }

    fn current_mut(&mut self) -> &mut TransferFunction {
        &mut self.functions[self.selection]
    }

    pub fn color_points(&self) -> &[ColorPoint] {
        self.current().colors().as_slice()
    }

    pub fn opacity_points(&self) -> &[OpacityPoint] {
        self.current().opacity().as_slice()
    }

    /// Make `index` the current function.
    ///
    /// Out-of-range indices are ignored. Re-selecting the current function
    /// is not a change. Returns whether the selection moved.
    pub fn select_function(&mut self, index: usize) -> bool {
        if index >= self.functions.len() || index == self.selection {
            return false;
        }
        self.selection = index;
        self.mark_dirty("selection");
        true
    }

    /// Add a function from flattened lists and select it.
    ///
    /// Names are unique: if `name` already exists that entry is selected and
    /// the supplied points are discarded. Returns the selected index.
    pub fn add_function(
        &mut self,
        name: &str,
        color_flat: &[f32],
        opacity_flat: &[f32],
    ) -> Result<usize, TfnError> {
        if let Some(index) = self.functions.iter().position(|f| f.name() == name) {
            tracing::debug!("add_function: {name} exists, selecting #{index}");
            self.select_existing(index);
            return Ok(index);
        }

        let function = TransferFunction::from_flat(name, color_flat, opacity_flat, false)?;
        tracing::info!(
            "added transfer function {name} ({} color, {} opacity points)",
            function.colors().len(),
            function.opacity().len()
        );
        Ok(self.push_and_select(function))
    }

    /// Register a function produced by a file loader and select it.
    ///
    /// On failure the registry and the current selection are untouched.
    pub fn load(&mut self, loaded: LoadedFunction) -> Result<usize, TfnError> {
        let name = loaded.name.clone();
        let function = TransferFunction::from_loaded(loaded).inspect_err(|e| {
            tracing::warn!("rejected transfer function {name}: {e}");
        })?;
        tracing::info!("loaded transfer function {name}");
        Ok(self.push_and_select(function))
    }

    fn push_and_select(&mut self, function: TransferFunction) -> usize {
        self.functions.push(function);
        let index = self.functions.len() - 1;
        self.select_existing(index);
        index
    }

    /// Select `index` and always mark dirty, even if already current.
    fn select_existing(&mut self, index: usize) {
        self.selection = index;
        self.mark_dirty("selection");
    }

    // ── Color points ─────────────────────────────────────────────

    /// Insert an interior color point. Returns its index, or `None` if the
    /// position is at or outside the boundary points.
    pub fn insert_color_point(&mut self, position: f32, rgb: [f32; 3]) -> Option<usize> {
        let index = self.current_mut().colors_mut().insert(position, rgb)?;
        self.mark_dirty("color point inserted");
        Some(index)
    }

    /// Insert a color point whose color is the current curve's value at
    /// `position`. No-op on non-editable functions.
    pub fn add_color_point_at(&mut self, position: f32) -> Option<usize> {
        if !self.current().is_editable() {
            return None;
        }
        let rgb = self.current().color_at(position);
        self.insert_color_point(position, rgb)
    }

    /// Remove an interior color point. Boundary points are kept.
    pub fn remove_color_point(&mut self, index: usize) -> bool {
        let removed = self.current_mut().colors_mut().remove(index);
        if removed {
            self.mark_dirty("color point removed");
        }
        removed
    }

    /// Move a color point and set its color. Interior points stay between
    /// their neighbors; boundary points only change color.
    pub fn move_color_point(&mut self, index: usize, position: f32, rgb: [f32; 3]) -> bool {
        let moved = self.current_mut().colors_mut().move_point(index, position, rgb);
        if moved {
            self.mark_dirty("color point moved");
        }
        moved
    }

    /// Recolor a point in place.
    pub fn set_color(&mut self, index: usize, rgb: [f32; 3]) -> bool {
        let changed = self.current_mut().colors_mut().set_value(index, rgb);
        if changed {
            self.mark_dirty("color changed");
        }
        changed
    }

    // ── Opacity points ───────────────────────────────────────────

    /// Insert an interior opacity point with a free alpha.
    pub fn insert_opacity_point(&mut self, position: f32, alpha: f32) -> Option<usize> {
        let index = self.current_mut().opacity_mut().insert(position, alpha)?;
        self.mark_dirty("opacity point inserted");
        Some(index)
    }

    /// Insert an opacity point from an editor click. No-op on non-editable
    /// functions.
    pub fn add_opacity_point_at(&mut self, position: f32, alpha: f32) -> Option<usize> {
        if !self.current().is_editable() {
            return None;
        }
        self.insert_opacity_point(position, alpha)
    }

    /// Remove an interior opacity point. Boundary points are kept.
    pub fn remove_opacity_point(&mut self, index: usize) -> bool {
        let removed = self.current_mut().opacity_mut().remove(index);
        if removed {
            self.mark_dirty("opacity point removed");
        }
        removed
    }

    /// Move an opacity point and set its alpha. Boundary points only change
    /// alpha.
    pub fn move_opacity_point(&mut self, index: usize, position: f32, alpha: f32) -> bool {
        let moved = self
            .current_mut()
            .opacity_mut()
            .move_point(index, position, alpha);
        if moved {
            self.mark_dirty("opacity point moved");
        }
        moved
    }

    /// Set a point's alpha in place.
    pub fn set_opacity(&mut self, index: usize, alpha: f32) -> bool {
        let changed = self.current_mut().opacity_mut().set_value(index, alpha);
        if changed {
            self.mark_dirty("opacity changed");
        }
        changed
    }

    // ── Value range ──────────────────────────────────────────────

    /// The active value range passed to the sink.
    pub fn value_range(&self) -> ValueRange {
        self.value_range
    }

    /// The range implied by the data's metadata.
    pub fn default_range(&self) -> ValueRange {
        self.default_range
    }

    /// Set both the default and the active range.
    pub fn set_default_value_range(&mut self, low: f32, high: f32) {
        let range = ValueRange::new(low, high);
        self.default_range = range;
        self.value_range = range;
        self.mark_dirty("default value range");
    }

    /// Set the active range. Reversed bounds are swapped.
    pub fn set_value_range(&mut self, low: f32, high: f32) {
        self.value_range = ValueRange::new(low, high);
        self.mark_dirty("value range");
    }

    /// Narrow the active range to a percentage window of the default range.
    pub fn set_value_range_percent(&mut self, low_pct: f32, high_pct: f32) {
        self.value_range = self.default_range.sub_range_percent(low_pct, high_pct);
        self.mark_dirty("value range");
    }

    // ── Commit ───────────────────────────────────────────────────

    /// Whether an edit is waiting to be committed.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force the next `render` to commit.
    pub fn invalidate(&mut self) {
        self.mark_dirty("invalidated");
    }

    fn mark_dirty(&mut self, cause: &str) {
        tracing::debug!("transfer function dirty: {cause}");
        self.dirty = true;
    }

    /// The palette from the most recent sample, for preview drawing.
    pub fn palette(&self) -> Option<&SampledTable> {
        self.palette.as_ref()
    }

    /// Sample and commit at the configured resolution.
    pub fn render(&mut self) -> Result<bool, TfnError> {
        self.render_with(self.config.effective_resolution())
    }

    /// Sample the current function and commit it if dirty.
    ///
    /// Returns `Ok(false)` when nothing changed since the last commit. A
    /// sink error is returned as-is and the editor stays dirty.
    pub fn render_with(&mut self, resolution: usize) -> Result<bool, TfnError> {
        if !self.dirty {
            return Ok(false);
        }

        let table = self.current().sample(resolution)?;
        let range = self.value_range;
        let result = self.sink.commit(&table.colors, &table.alphas, range);
        self.palette = Some(table);

        if let Err(e) = result {
            tracing::warn!("transfer function commit failed: {e}");
            return Err(e);
        }

        self.dirty = false;
        tracing::debug!(
            "committed transfer function {} at {resolution} samples",
            self.current().name()
        );
        Ok(true)
    }
}

impl<S: Clone> Clone for TransferFunctionEditor<S> {
    /// The clone starts dirty and without a palette, so it commits its own
    /// initial state.
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            sink: self.sink.clone(),
            functions: self.functions.clone(),
            selection: self.selection,
            value_range: self.value_range,
            default_range: self.default_range,
            dirty: true,
            palette: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;

    fn editor() -> TransferFunctionEditor<NullSink> {
        let config = EditorConfig {
            resolution: 8,
            ..EditorConfig::default()
        };
        TransferFunctionEditor::new(config, NullSink).unwrap()
    }

    fn select_by_name<S: CommitSink>(editor: &mut TransferFunctionEditor<S>, name: &str) {
        let index = editor.names().position(|n| n == name).unwrap();
        editor.select_function(index);
    }

    #[test]
    fn test_new_selects_first_preset_and_starts_dirty() {
        let editor = editor();
        assert_eq!(editor.current_index(), 0);
        assert_eq!(editor.current().name(), presets::builtins()[0].name);
        assert_eq!(editor.functions().len(), presets::builtins().len());
        assert!(editor.is_dirty());
        assert!(editor.palette().is_none());
    }

    #[test]
    fn test_render_clears_dirty_once() {
        let mut editor = editor();
        assert!(editor.render().unwrap());
        assert!(!editor.is_dirty());
        assert!(!editor.render().unwrap());
        assert_eq!(editor.palette().map(|t| t.resolution), Some(8));
    }

    #[test]
    fn test_select_same_index_is_not_a_change() {
        let mut editor = editor();
        editor.render().unwrap();
        assert!(!editor.select_function(0));
        assert!(!editor.is_dirty());
        assert!(!editor.select_function(999));
        assert!(!editor.is_dirty());
        assert!(editor.select_function(1));
        assert!(editor.is_dirty());
    }

    #[test]
    fn test_noop_edits_do_not_dirty() {
        let mut editor = editor();
        editor.render().unwrap();
        assert!(!editor.remove_color_point(0));
        assert_eq!(editor.insert_opacity_point(1.0, 0.5), None);
        assert!(!editor.move_color_point(100, 0.5, [0.0; 3]));
        assert!(!editor.set_opacity(100, 0.5));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn test_add_color_point_at_interpolates_current_curve() {
        let mut editor = editor();
        select_by_name(&mut editor, "Grayscale");
        let index = editor.add_color_point_at(0.25).unwrap();
        assert_eq!(index, 1);
        let pt = editor.color_points()[1];
        assert_eq!(pt.position, 0.25);
        assert_eq!(pt.rgb(), [0.25, 0.25, 0.25]);
    }

    #[test]
    fn test_add_point_gestures_respect_editability() {
        let mut editor = editor();
        select_by_name(&mut editor, "Viridis");
        assert!(!editor.current().is_editable());
        assert_eq!(editor.add_color_point_at(0.55), None);
        assert_eq!(editor.add_opacity_point_at(0.3, 0.9), None);
        assert_eq!(editor.insert_color_point(0.55, [1.0, 0.0, 0.0]), Some(6));
    }

    #[test]
    fn test_value_range_percent_uses_default_range() {
        let mut editor = editor();
        editor.set_default_value_range(100.0, 0.0);
        assert_eq!(editor.default_range(), ValueRange::new(0.0, 100.0));
        assert_eq!(editor.value_range(), ValueRange::new(0.0, 100.0));
        editor.render().unwrap();

        editor.set_value_range_percent(10.0, 90.0);
        assert!(editor.is_dirty());
        let range = editor.value_range();
        assert!((range.low - 10.0).abs() < 1e-4);
        assert!((range.high - 90.0).abs() < 1e-4);
        assert_eq!(editor.default_range(), ValueRange::new(0.0, 100.0));
    }

    #[test]
    fn test_clone_starts_dirty() {
        let mut editor = editor();
        editor.render().unwrap();
        let copy = editor.clone();
        assert!(copy.is_dirty());
        assert!(copy.palette().is_none());
        assert_eq!(copy.functions(), editor.functions());
    }

    #[test]
    fn test_invalid_resolution_keeps_dirty() {
        let mut editor = editor();
        let err = editor.render_with(1).unwrap_err();
        assert!(matches!(err, TfnError::InvalidResolution(1)));
        assert!(editor.is_dirty());
    }
}
