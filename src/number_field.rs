//!
//! Number field bound to an optional number.
//!
//! The field shows the formatted value of its [Binding] when it is
//! rendered the first time. While editing, every change of the text
//! is parsed and written to the binding, text that doesn't parse writes
//! `None`. The text itself stays as typed.
//!
//! When the field loses the focus the text is parsed once more and, if it
//! parses, replaced with the formatted value. This replacement doesn't
//! happen immediately but on the next turn of the event loop via the
//! [DeferredQueue]. The app routes the tasks back with
//! [NumberFieldState::apply_deferred].
//!
//! Gaining the focus changes nothing.
//!
//! The focus changes are read from the lost/gained markers of the
//! [FocusFlag], so the field must see the event that moved the focus.
//!
//! ```
//! use rat_number_field::deferred::DeferredQueue;
//! use rat_number_field::formatter::{NumberStyle, StyleFormatter};
//! use rat_number_field::number_field::NumberFieldState;
//! use rat_number_field::{Binding, Locale};
//!
//! let queue = DeferredQueue::new();
//! let amount = Binding::new(Some(1.0));
//! let fmt = StyleFormatter::new(NumberStyle::Currency, Locale::en_US).lenient(true);
//!
//! let mut field = NumberFieldState::new("Check Amount", &amount, fmt, &queue);
//! field.appear();
//! assert_eq!(field.text(), "$1.00");
//!
//! field.set_text("12.5");
//! assert_eq!(amount.get(), Some(12.5));
//!
//! field.focus_lost();
//! while let Some(task) = queue.take() {
//!     field.apply_deferred(&task);
//! }
//! assert_eq!(field.text(), "$12.50");
//! ```
//!

use crate::_private::NonExhaustive;
use crate::deferred::{Deferred, DeferredQueue, LiveToken};
use crate::formatter::NumberFormatter;
use crate::Binding;
use log::debug;
use rat_event::{HandleEvent, MouseOnly, Outcome, Regular};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use rat_text::event::ReadOnly;
use rat_text::text_input::{TextInput, TextInputState};
use rat_text::HasScreenCursor;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, StatefulWidget};
use std::fmt::{Debug, Formatter};
use std::rc::Rc;

pub use event::NumberFieldOutcome;

/// Number field widget.
///
/// Draws the label while the text is empty and the field
/// doesn't have the focus.
#[derive(Debug, Default, Clone)]
pub struct NumberField<'a> {
    widget: TextInput<'a>,
    label_style: Option<Style>,
}

/// Combined style for the number field.
#[derive(Debug, Clone)]
pub struct NumberFieldStyle {
    pub style: Style,
    pub focus: Option<Style>,
    pub select: Option<Style>,
    /// Style for the label, shown while the field is empty.
    pub label: Option<Style>,
    pub block: Option<Block<'static>>,

    pub non_exhaustive: NonExhaustive,
}

/// Lifecycle of the field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    /// Not yet shown.
    #[default]
    Uninitialized,
    /// Shown, no edits since the last focus change.
    Idle,
    /// The text has been edited.
    Editing,
}

/// State & event handling.
pub struct NumberFieldState {
    /// Text input.
    pub widget: TextInputState,

    label: String,
    binding: Binding,
    formatter: Rc<dyn NumberFormatter>,
    queue: DeferredQueue,
    token: LiveToken,

    phase: FieldPhase,
    last_formatted: Option<f64>,

    on_value_changed: Option<Box<dyn FnMut(Option<f64>)>>,

    pub non_exhaustive: NonExhaustive,
}

impl Default for NumberFieldStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            focus: None,
            select: None,
            label: None,
            block: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl<'a> NumberField<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the combined style.
    #[inline]
    pub fn styles(mut self, styles: NumberFieldStyle) -> Self {
        self.widget = self.widget.style(styles.style);
        if let Some(focus) = styles.focus {
            self.widget = self.widget.focus_style(focus);
        }
        if let Some(select) = styles.select {
            self.widget = self.widget.select_style(select);
        }
        if let Some(label) = styles.label {
            self.label_style = Some(label);
        }
        if let Some(block) = styles.block {
            self.widget = self.widget.block(block);
        }
        self
    }

    /// Base text style.
    #[inline]
    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.widget = self.widget.style(style);
        self
    }

    /// Style when focused.
    #[inline]
    pub fn focus_style(mut self, style: impl Into<Style>) -> Self {
        self.widget = self.widget.focus_style(style);
        self
    }

    /// Style for selection
    #[inline]
    pub fn select_style(mut self, style: impl Into<Style>) -> Self {
        self.widget = self.widget.select_style(style);
        self
    }

    /// Style for the label.
    #[inline]
    pub fn label_style(mut self, style: impl Into<Style>) -> Self {
        self.label_style = Some(style.into());
        self
    }

    #[inline]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.widget = self.widget.block(block);
        self
    }
}

impl StatefulWidget for NumberField<'_> {
    type State = NumberFieldState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        state.appear();
        self.widget.render(area, buf, &mut state.widget);

        if state.widget.is_empty() && !state.is_focused() {
            let inner = state.widget.inner;
            let style = self.label_style.unwrap_or_default();
            buf.set_stringn(inner.x, inner.y, &state.label, inner.width as usize, style);
        }
    }
}

impl Debug for NumberFieldState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NumberFieldState")
            .field("widget", &self.widget)
            .field("label", &self.label)
            .field("binding", &self.binding)
            .field("formatter", &self.formatter)
            .field("token", &self.token)
            .field("phase", &self.phase)
            .field("last_formatted", &self.last_formatted)
            .field("on_value_changed", &self.on_value_changed.is_some())
            .finish()
    }
}

impl HasFocus for NumberFieldState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    #[inline]
    fn focus(&self) -> FocusFlag {
        self.widget.focus.clone()
    }

    #[inline]
    fn area(&self) -> Rect {
        self.widget.area
    }
}

impl NumberFieldState {
    /// New field.
    ///
    /// * label: shown while the field is empty, and used as debug name.
    /// * binding: the value. The field keeps a clone of the handle.
    /// * formatter: converts between text and value.
    /// * queue: receives the reformat after the focus is lost.
    pub fn new(
        label: &str,
        binding: &Binding,
        formatter: impl NumberFormatter + 'static,
        queue: &DeferredQueue,
    ) -> Self {
        Self {
            widget: TextInputState::named(label),
            label: label.to_string(),
            binding: binding.clone(),
            formatter: Rc::new(formatter),
            queue: queue.clone(),
            token: LiveToken::new(),
            phase: FieldPhase::Uninitialized,
            last_formatted: None,
            on_value_changed: None,
            non_exhaustive: NonExhaustive,
        }
    }

    /// Called with the new value whenever the field writes the binding.
    pub fn on_value_changed(mut self, f: impl FnMut(Option<f64>) + 'static) -> Self {
        self.on_value_changed = Some(Box::new(f));
        self
    }

    /// Label
    #[inline]
    pub fn label(&self) -> &str {
        self.label.as_str()
    }

    /// Formatter
    #[inline]
    pub fn formatter(&self) -> &dyn NumberFormatter {
        self.formatter.as_ref()
    }

    /// Lifecycle phase.
    #[inline]
    pub fn phase(&self) -> FieldPhase {
        self.phase
    }

    /// Displayed text.
    #[inline]
    pub fn text(&self) -> &str {
        self.widget.text()
    }

    /// Current value of the binding.
    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.binding.get()
    }

    /// Binding
    #[inline]
    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Value parsed when the focus was lost the last time.
    #[inline]
    pub fn last_formatted_value(&self) -> Option<f64> {
        self.last_formatted
    }

    /// Token for the deferred tasks of this field.
    #[inline]
    pub fn live_token(&self) -> &LiveToken {
        &self.token
    }

    /// The task was scheduled by this field.
    #[inline]
    pub fn is_target_of(&self, task: &Deferred) -> bool {
        task.is_from(&self.token)
    }

    /// First display.
    ///
    /// Shows the formatted value of the binding, if there is one
    /// and it can be rendered. Only acts once, later calls do nothing.
    /// Returns true if the text has been set.
    pub fn appear(&mut self) -> bool {
        if self.phase != FieldPhase::Uninitialized {
            return false;
        }
        self.phase = FieldPhase::Idle;

        let Some(value) = self.binding.get() else {
            debug!("{} appear empty", self.label);
            return false;
        };
        let Some(text) = self.formatter.render(value) else {
            debug!("{} appear, can't render {}", self.label, value);
            return false;
        };
        debug!("{} appear {:?}", self.label, text);
        self.write_through(text);
        true
    }

    /// Text change.
    ///
    /// Shows the text as is and writes the parsed value to the binding.
    /// Any pending reformat is cancelled.
    pub fn set_text<S: Into<String>>(&mut self, s: S) -> Option<f64> {
        self.widget.set_text(s);
        self.text_changed()
    }

    /// Cancel a pending reformat.
    pub fn cancel_deferred(&mut self) {
        self.token.bump();
    }

    /// Focus lost.
    ///
    /// Parses the text and, if it parses, schedules the
    /// reformat for the next turn of the event loop.
    pub fn focus_lost(&mut self) {
        self.last_formatted = self.formatter.parse(self.widget.text());
        self.phase = FieldPhase::Idle;

        let Some(value) = self.last_formatted else {
            debug!("{} focus lost, keep {:?}", self.label, self.widget.text());
            return;
        };
        match self.formatter.render(value) {
            Some(text) => {
                debug!("{} focus lost, reformat {:?}", self.label, text);
                self.queue.push(self.token.schedule(text));
            }
            None => {
                debug!("{} focus lost, can't render {}", self.label, value);
            }
        }
    }

    /// Focus gained. Nothing happens.
    pub fn focus_gained(&mut self) {
        debug!("{} focus gained", self.label);
    }

    /// Apply a deferred reformat.
    ///
    /// * Continue: the task is for another field.
    /// * Unchanged: the task has been cancelled.
    /// * Changed: the text has been replaced.
    pub fn apply_deferred(&mut self, task: &Deferred) -> Outcome {
        if !self.is_target_of(task) {
            return Outcome::Continue;
        }
        if !task.is_current() {
            debug!("{} deferred stale {:?}", self.label, task);
            return Outcome::Unchanged;
        }
        debug!("{} deferred apply {:?}", self.label, task.text());
        self.write_through(task.text().to_string());
        Outcome::Changed
    }

    // The binding setter: set the text, derive the value from it.
    // Doesn't count as an edit.
    fn write_through(&mut self, text: String) {
        self.widget.set_text(text);
        let value = self.formatter.parse(self.widget.text());
        self.set_value(value);
    }

    // An edit of the text.
    fn text_changed(&mut self) -> Option<f64> {
        self.token.bump();
        self.phase = FieldPhase::Editing;
        let value = self.formatter.parse(self.widget.text());
        self.set_value(value);
        value
    }

    fn set_value(&mut self, value: Option<f64>) {
        self.binding.set(value);
        if let Some(f) = self.on_value_changed.as_mut() {
            f(value);
        }
    }
}

impl HasScreenCursor for NumberFieldState {
    /// The current text cursor as an absolute screen position.
    #[inline]
    fn screen_cursor(&self) -> Option<(u16, u16)> {
        self.widget.screen_cursor()
    }
}

impl HandleEvent<crossterm::event::Event, Regular, NumberFieldOutcome> for NumberFieldState {
    fn handle(&mut self, event: &crossterm::event::Event, _keymap: Regular) -> NumberFieldOutcome {
        let mut f = NumberFieldOutcome::Continue;
        if self.lost_focus() {
            self.focus_lost();
            f = NumberFieldOutcome::Changed;
        }
        if self.gained_focus() {
            self.focus_gained();
        }

        let r: NumberFieldOutcome = self.widget.handle(event, Regular).into();
        if r == NumberFieldOutcome::Value {
            self.text_changed();
        }

        if r == NumberFieldOutcome::Continue {
            f
        } else {
            r.max(f)
        }
    }
}

impl HandleEvent<crossterm::event::Event, ReadOnly, NumberFieldOutcome> for NumberFieldState {
    fn handle(&mut self, event: &crossterm::event::Event, _keymap: ReadOnly) -> NumberFieldOutcome {
        self.widget.handle(event, ReadOnly).into()
    }
}

impl HandleEvent<crossterm::event::Event, MouseOnly, NumberFieldOutcome> for NumberFieldState {
    fn handle(&mut self, event: &crossterm::event::Event, _keymap: MouseOnly) -> NumberFieldOutcome {
        self.widget.handle(event, MouseOnly).into()
    }
}

/// Handle all events.
/// Text events are only processed if focus is true.
/// Mouse events are processed if they are in range.
pub fn handle_events(
    state: &mut NumberFieldState,
    focus: bool,
    event: &crossterm::event::Event,
) -> NumberFieldOutcome {
    let flag = &state.widget.focus;
    if flag.get() != focus {
        flag.set(focus);
        flag.set_gained(focus);
        flag.set_lost(!focus);
    } else {
        flag.set_gained(false);
        flag.set_lost(false);
    }
    HandleEvent::handle(state, event, Regular)
}

/// Handle only mouse-events.
pub fn handle_mouse_events(
    state: &mut NumberFieldState,
    event: &crossterm::event::Event,
) -> NumberFieldOutcome {
    HandleEvent::handle(state, event, MouseOnly)
}

pub mod event {
    use rat_event::{ConsumedEvent, Outcome};
    use rat_text::event::TextOutcome;

    /// Result of event handling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum NumberFieldOutcome {
        /// The given event has not been used at all.
        Continue,
        /// The event has been recognized, but the result was nil.
        Unchanged,
        /// Something changed, but not the value.
        Changed,
        /// The text changed and the new value has been written to the binding.
        Value,
    }

    impl ConsumedEvent for NumberFieldOutcome {
        fn is_consumed(&self) -> bool {
            *self != NumberFieldOutcome::Continue
        }
    }

    impl From<NumberFieldOutcome> for Outcome {
        fn from(value: NumberFieldOutcome) -> Self {
            match value {
                NumberFieldOutcome::Continue => Outcome::Continue,
                NumberFieldOutcome::Unchanged => Outcome::Unchanged,
                NumberFieldOutcome::Changed => Outcome::Changed,
                NumberFieldOutcome::Value => Outcome::Changed,
            }
        }
    }

    impl From<TextOutcome> for NumberFieldOutcome {
        fn from(value: TextOutcome) -> Self {
            match value {
                TextOutcome::Continue => NumberFieldOutcome::Continue,
                TextOutcome::Unchanged => NumberFieldOutcome::Unchanged,
                TextOutcome::Changed => NumberFieldOutcome::Changed,
                TextOutcome::TextChanged => NumberFieldOutcome::Value,
            }
        }
    }
}
