use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use aics_core::suggestions::SUGGESTIONS;
use aics_core::{
    Config, Conversation, Modal, PanelMode, PendingReply, ResponseCatalog, SubmitOutcome,
};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;

use crate::form::{FormState, TextInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Chat,
    Chips,
    Panel,
    Input,
}

impl FocusPane {
    pub fn next(self) -> Self {
        match self {
            FocusPane::Chat => FocusPane::Chips,
            FocusPane::Chips => FocusPane::Panel,
            FocusPane::Panel => FocusPane::Input,
            FocusPane::Input => FocusPane::Chat,
        }
    }
}

/// One selectable row of the steps panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRow {
    Step(usize),
    Task(usize, usize),
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: FocusPane,
    pub config: Config,
    /// Where preference changes are written; `None` keeps them in memory
    pub config_path: Option<PathBuf>,
    pub conversation: Conversation,

    // Replies waiting out the "thinking" delay, oldest first
    pub pending_replies: VecDeque<(Instant, PendingReply)>,

    // Input box
    pub query: TextInput,

    // Open setup form, mirrors `conversation.modal()`
    pub form: Option<FormState>,

    // Selection state
    pub selected_chip: usize,
    pub panel_state: ListState,

    // Chat scrolling
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_width: u16,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Areas for mouse hit-testing (updated during render)
    pub chat_area: Option<Rect>,
    pub panel_area: Option<Rect>,
    pub input_area: Option<Rect>,
    pub chip_areas: Vec<Rect>,
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let catalog = Arc::new(ResponseCatalog::builtin()?);
        tracing::info!(entries = catalog.len(), "response catalog loaded");

        Ok(Self {
            should_quit: false,
            input_mode: InputMode::Editing,
            focus: FocusPane::Input,
            config,
            config_path: Config::get_config_path().ok(),
            conversation: Conversation::new(catalog),

            pending_replies: VecDeque::new(),
            query: TextInput::default(),
            form: None,

            selected_chip: 0,
            panel_state: ListState::default().with_selected(Some(0)),

            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,

            animation_frame: 0,

            chat_area: None,
            panel_area: None,
            input_area: None,
            chip_areas: Vec::new(),
        })
    }

    pub fn is_thinking(&self) -> bool {
        !self.pending_replies.is_empty()
    }

    /// Send whatever is in the input box
    pub fn submit_query(&mut self, now: Instant) {
        let text = self.query.take();
        let outcome = self.conversation.submit(&text);
        self.handle_outcome(outcome, now);
    }

    pub fn click_chip(&mut self, index: usize, now: Instant) {
        let Some(chip_id) = self
            .conversation
            .smart_chips()
            .get(index)
            .map(|c| c.id.clone())
        else {
            return;
        };
        let outcome = self.conversation.click_chip(&chip_id);
        self.handle_outcome(outcome, now);
    }

    fn handle_outcome(&mut self, outcome: SubmitOutcome, now: Instant) {
        match outcome {
            SubmitOutcome::Ignored => return,
            SubmitOutcome::OpenModal(modal) => self.form = Some(FormState::for_modal(modal)),
            SubmitOutcome::Reply(pending) => {
                let due = now + self.config.reply_delay();
                self.pending_replies.push_back((due, pending));
            }
        }
        self.scroll_chat_to_bottom();
    }

    /// Deliver every reply whose delay has elapsed, in submission order
    pub fn deliver_due_replies(&mut self, now: Instant) -> usize {
        let mut delivered = 0;
        while self
            .pending_replies
            .front()
            .is_some_and(|(due, _)| *due <= now)
        {
            let Some((_, pending)) = self.pending_replies.pop_front() else {
                break;
            };
            self.conversation.deliver(pending);
            delivered += 1;
        }

        if delivered > 0 {
            self.selected_chip = 0;
            self.clamp_panel_selection();
            self.scroll_chat_to_bottom();
        }
        delivered
    }

    /// Tick: deliver due replies and advance the thinking animation
    pub fn tick(&mut self, now: Instant) {
        self.deliver_due_replies(now);
        if self.is_thinking() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn apply_changes(&mut self) {
        if self.conversation.apply_changes() {
            self.scroll_chat_to_bottom();
        }
    }

    pub fn toggle_timestamps(&mut self) {
        self.config.show_timestamps = !self.config.show_timestamps;
        let Some(path) = &self.config_path else {
            return;
        };
        if let Err(err) = self.config.save_to(path) {
            tracing::warn!(error = %err, path = %path.display(), "could not save config");
        }
    }

    // Chips
    pub fn chip_next(&mut self) {
        let len = self.conversation.smart_chips().len();
        if len > 0 {
            self.selected_chip = (self.selected_chip + 1).min(len - 1);
        }
    }

    pub fn chip_prev(&mut self) {
        self.selected_chip = self.selected_chip.saturating_sub(1);
    }

    // Side panel
    pub fn toggle_panel(&mut self) {
        let next = if self.conversation.panel().shows_suggestions() {
            PanelMode::Steps
        } else {
            PanelMode::Suggestions
        };
        self.conversation.set_panel(next);
        self.panel_state.select(Some(0));
    }

    /// Rows of the steps panel: each step header followed by its tasks
    pub fn panel_rows(&self) -> Vec<PanelRow> {
        let mut rows = Vec::new();
        for (s, step) in self.conversation.checklist().steps().iter().enumerate() {
            rows.push(PanelRow::Step(s));
            rows.extend((0..step.tasks.len()).map(|t| PanelRow::Task(s, t)));
        }
        rows
    }

    pub fn panel_len(&self) -> usize {
        if self.conversation.panel().shows_suggestions() {
            SUGGESTIONS.len()
        } else {
            self.panel_rows().len()
        }
    }

    pub fn panel_nav_down(&mut self) {
        let len = self.panel_len();
        if len > 0 {
            let i = self.panel_state.selected().unwrap_or(0);
            self.panel_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn panel_nav_up(&mut self) {
        let i = self.panel_state.selected().unwrap_or(0);
        self.panel_state.select(Some(i.saturating_sub(1)));
    }

    /// Enter on the panel: toggle a task, or copy a suggestion into the input box
    pub fn activate_panel_item(&mut self) {
        let Some(i) = self.panel_state.selected() else {
            return;
        };

        if self.conversation.panel().shows_suggestions() {
            if let Some(suggestion) = SUGGESTIONS.get(i) {
                self.query.set(suggestion.text);
                self.focus = FocusPane::Input;
                self.input_mode = InputMode::Editing;
            }
            return;
        }

        if let Some(PanelRow::Task(s, t)) = self.panel_rows().get(i).copied() {
            let checklist = self.conversation.checklist();
            let step = &checklist.steps()[s];
            let (step_id, task_id) = (step.id.clone(), step.tasks[t].id.clone());
            self.conversation.toggle_task(&step_id, &task_id);
        }
    }

    fn clamp_panel_selection(&mut self) {
        let len = self.panel_len();
        match self.panel_state.selected() {
            Some(i) if i >= len => self.panel_state.select(Some(len.saturating_sub(1))),
            None => self.panel_state.select(Some(0)),
            _ => {}
        }
    }

    // Forms
    pub fn open_form(&mut self, modal: Modal) {
        self.conversation.open_modal(modal);
        self.form = Some(FormState::for_modal(modal));
    }

    pub fn close_form(&mut self) {
        self.conversation.close_modal();
        self.form = None;
    }

    /// Validate and save the open form. Validation errors stay on the form.
    pub fn save_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };

        let result = match form {
            FormState::Location(location) => {
                self.conversation.save_location(&location.to_data())
            }
            FormState::Pstn(pstn) => match pstn.confirm() {
                Some(data) => self.conversation.save_pstn(&data),
                None => return,
            },
            FormState::PhoneNumbers(numbers) => {
                self.conversation.save_phone_numbers(&numbers.to_data())
            }
        };

        match result {
            Ok(()) => {
                self.form = None;
                self.selected_chip = 0;
                self.scroll_chat_to_bottom();
            }
            Err(err) => {
                tracing::debug!(error = %err, "form rejected");
                form.set_error(capitalize(&err.to_string()));
            }
        }
    }

    // Chat scrolling
    pub fn scroll_down(&mut self, lines: u16) {
        let max = self.chat_total_lines().saturating_sub(self.visible_height());
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(max);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn scroll_half_page(&mut self, down: bool) {
        let half_page = (self.visible_height() / 2).max(1);
        if down {
            self.scroll_down(half_page);
        } else {
            self.scroll_up(half_page);
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.chat_scroll = 0;
    }

    /// Scroll chat to bottom so the newest message (or "Thinking...") is visible
    pub fn scroll_chat_to_bottom(&mut self) {
        let total_lines = self.chat_total_lines();
        let visible_height = self.visible_height();
        self.chat_scroll = total_lines.saturating_sub(visible_height);
    }

    fn visible_height(&self) -> u16 {
        if self.chat_height > 0 {
            self.chat_height
        } else {
            20
        }
    }

    /// Rough line count of the rendered chat, matching the layout in `ui::chat_lines`
    pub fn chat_line_count(&self) -> usize {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };
        let wrapped = |line: &str| {
            // Use character count, not byte length, for proper UTF-8 handling
            line.chars().count() / wrap_width + 1
        };

        let mut total_lines: usize = 0;
        for msg in self.conversation.messages() {
            let body = match msg.card() {
                Some(card) => card.fields.len(),
                None => {
                    let text: usize = msg.content.lines().map(wrapped).sum();
                    text + usize::from(msg.chips.is_some())
                }
            };
            // role line ("You:", "AI:" or card title) and trailing blank line
            total_lines = total_lines.saturating_add(body.saturating_add(2));
        }

        if self.is_thinking() {
            total_lines = total_lines.saturating_add(2); // "AI:" + "Thinking..."
        }
        total_lines
    }

    /// Line count clamped to the range ratatui's scroll offset can address
    pub fn chat_total_lines(&self) -> u16 {
        self.chat_line_count().min(u16::MAX as usize) as u16
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
