use aics_core::forms::{
    parse_numbers, ConnectionType, LocationData, PhoneNumbersData, PstnData, PstnProvider,
    COUNTRIES, PSTN_PROVIDERS, TIMEZONES,
};
use aics_core::Modal;
use ratatui::widgets::ListState;

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Single line text buffer with a character (not byte) cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub fn set(&mut self, value: &str) {
        *self = Self::new(value);
    }

    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.value, self.cursor);
        self.value.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Visible slice for a box `width` characters wide, plus the cursor column within it
    pub fn visible(&self, width: usize) -> (String, usize) {
        let scroll_offset = if width == 0 || self.cursor < width {
            0
        } else {
            self.cursor - width + 1
        };
        let text = self.value.chars().skip(scroll_offset).take(width).collect();
        (text, self.cursor - scroll_offset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Name,
    Country,
    Address,
    AddressLine2,
    City,
    State,
    ZipCode,
    Timezone,
}

impl LocationField {
    pub const ALL: [LocationField; 8] = [
        LocationField::Name,
        LocationField::Country,
        LocationField::Address,
        LocationField::AddressLine2,
        LocationField::City,
        LocationField::State,
        LocationField::ZipCode,
        LocationField::Timezone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LocationField::Name => "Location name",
            LocationField::Country => "Country",
            LocationField::Address => "Address",
            LocationField::AddressLine2 => "Address line 2",
            LocationField::City => "City",
            LocationField::State => "State",
            LocationField::ZipCode => "ZIP code",
            LocationField::Timezone => "Timezone",
        }
    }

    pub fn required(&self) -> bool {
        matches!(
            self,
            LocationField::Name | LocationField::Country | LocationField::Address
        )
    }

    /// Fields picked from a fixed list with Left/Right instead of typed
    pub fn choices(&self) -> Option<&'static [(&'static str, &'static str)]> {
        match self {
            LocationField::Country => Some(COUNTRIES),
            LocationField::Timezone => Some(TIMEZONES),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocationForm {
    inputs: [TextInput; 8],
    pub focused: usize,
    pub error: Option<String>,
}

impl LocationForm {
    pub fn focused_field(&self) -> LocationField {
        LocationField::ALL[self.focused]
    }

    pub fn input(&self, field: LocationField) -> &TextInput {
        &self.inputs[field as usize]
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        &mut self.inputs[self.focused]
    }

    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % LocationField::ALL.len();
    }

    pub fn prev_field(&mut self) {
        self.focused = (self.focused + LocationField::ALL.len() - 1) % LocationField::ALL.len();
    }

    /// Step through the focused field's choices; no-op on free text fields
    pub fn cycle_choice(&mut self, forward: bool) {
        let Some(choices) = self.focused_field().choices() else {
            return;
        };
        let current = choices
            .iter()
            .position(|(code, _)| *code == self.inputs[self.focused].value);
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % choices.len(),
            (Some(i), false) => (i + choices.len() - 1) % choices.len(),
        };
        self.inputs[self.focused].set(choices[next].0);
    }

    /// Display text for a choice field ("US - United States")
    pub fn choice_display(&self, field: LocationField) -> Option<String> {
        let value = &self.input(field).value;
        field.choices()?.iter().find(|(code, _)| code == value).map(|(code, name)| {
            format!("{} - {}", code, name)
        })
    }

    pub fn to_data(&self) -> LocationData {
        let value = |field: LocationField| self.input(field).value.trim().to_string();
        LocationData {
            name: value(LocationField::Name),
            country: value(LocationField::Country),
            address: value(LocationField::Address),
            address_line2: value(LocationField::AddressLine2),
            city: value(LocationField::City),
            state: value(LocationField::State),
            zip_code: value(LocationField::ZipCode),
            timezone: value(LocationField::Timezone),
            ..LocationData::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PstnPage {
    ConnectionType,
    Provider,
}

#[derive(Debug, Clone)]
pub struct PstnForm {
    pub page: PstnPage,
    pub type_state: ListState,
    pub provider_state: ListState,
    pub error: Option<String>,
}

impl Default for PstnForm {
    fn default() -> Self {
        Self {
            page: PstnPage::ConnectionType,
            type_state: ListState::default().with_selected(Some(0)),
            provider_state: ListState::default().with_selected(Some(0)),
            error: None,
        }
    }
}

impl PstnForm {
    pub fn selected_type(&self) -> ConnectionType {
        let types = ConnectionType::all();
        let i = self.type_state.selected().unwrap_or(0).min(types.len() - 1);
        types[i]
    }

    pub fn selected_provider(&self) -> Option<&'static PstnProvider> {
        self.provider_state.selected().and_then(|i| PSTN_PROVIDERS.get(i))
    }

    pub fn nav_down(&mut self) {
        let (state, len) = self.current_list();
        let i = state.selected().unwrap_or(0);
        state.select(Some((i + 1).min(len - 1)));
    }

    pub fn nav_up(&mut self) {
        let (state, _) = self.current_list();
        let i = state.selected().unwrap_or(0);
        state.select(Some(i.saturating_sub(1)));
    }

    /// Advance the wizard. Returns the finished data once nothing is left to pick.
    pub fn confirm(&mut self) -> Option<PstnData> {
        let connection_type = self.selected_type();
        match self.page {
            PstnPage::ConnectionType if connection_type.needs_provider() => {
                self.page = PstnPage::Provider;
                None
            }
            PstnPage::ConnectionType => Some(PstnData {
                connection_type,
                provider: None,
            }),
            PstnPage::Provider => Some(PstnData {
                connection_type,
                provider: self.selected_provider().map(|p| p.id.to_string()),
            }),
        }
    }

    /// Go back one page. Returns false when already on the first page.
    pub fn back(&mut self) -> bool {
        match self.page {
            PstnPage::Provider => {
                self.page = PstnPage::ConnectionType;
                self.error = None;
                true
            }
            PstnPage::ConnectionType => false,
        }
    }

    fn current_list(&mut self) -> (&mut ListState, usize) {
        match self.page {
            PstnPage::ConnectionType => (&mut self.type_state, ConnectionType::all().len()),
            PstnPage::Provider => (&mut self.provider_state, PSTN_PROVIDERS.len()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PhoneNumbersForm {
    pub input: TextInput,
    pub activate_later: bool,
    /// Focus is on the "activate later" checkbox rather than the text box
    pub checkbox_focused: bool,
    pub error: Option<String>,
}

impl PhoneNumbersForm {
    pub fn to_data(&self) -> PhoneNumbersData {
        PhoneNumbersData {
            numbers: parse_numbers(&self.input.value),
            activate_later: self.activate_later,
        }
    }
}

#[derive(Debug, Clone)]
pub enum FormState {
    Location(LocationForm),
    Pstn(PstnForm),
    PhoneNumbers(PhoneNumbersForm),
}

impl FormState {
    pub fn for_modal(modal: Modal) -> Self {
        match modal {
            Modal::Location => FormState::Location(LocationForm::default()),
            Modal::Pstn => FormState::Pstn(PstnForm::default()),
            Modal::PhoneNumbers => FormState::PhoneNumbers(PhoneNumbersForm::default()),
        }
    }

    pub fn modal(&self) -> Modal {
        match self {
            FormState::Location(_) => Modal::Location,
            FormState::Pstn(_) => Modal::Pstn,
            FormState::PhoneNumbers(_) => Modal::PhoneNumbers,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FormState::Location(f) => f.error.as_deref(),
            FormState::Pstn(f) => f.error.as_deref(),
            FormState::PhoneNumbers(f) => f.error.as_deref(),
        }
    }

    pub fn set_error(&mut self, message: String) {
        let slot = match self {
            FormState::Location(f) => &mut f.error,
            FormState::Pstn(f) => &mut f.error,
            FormState::PhoneNumbers(f) => &mut f.error,
        };
        *slot = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input_utf8_editing() {
        let mut input = TextInput::new("café");
        assert_eq!(input.cursor, 4);

        input.backspace();
        assert_eq!(input.value, "caf");
        input.insert('é');
        input.home();
        input.delete();
        assert_eq!(input.value, "afé");
        input.end();
        input.right();
        assert_eq!(input.cursor, 3);

        assert_eq!(input.take(), "afé");
        assert!(input.is_empty());
        assert_eq!(input.cursor, 0);
    }

    #[test]
    fn test_visible_window_follows_cursor() {
        let input = TextInput::new("0123456789");
        let (text, cursor) = input.visible(4);
        assert_eq!(text, "789");
        assert_eq!(cursor, 3);

        let mut input = input;
        input.home();
        assert_eq!(input.visible(4), ("0123".to_string(), 0));
    }

    #[test]
    fn test_location_choice_cycling() {
        let mut form = LocationForm::default();
        form.next_field();
        assert_eq!(form.focused_field(), LocationField::Country);

        form.cycle_choice(true);
        assert_eq!(form.input(LocationField::Country).value, "US");
        form.cycle_choice(false);
        assert_eq!(form.input(LocationField::Country).value, "FR");
        assert_eq!(
            form.choice_display(LocationField::Country).as_deref(),
            Some("FR - France")
        );

        // free text fields ignore cycling
        form.prev_field();
        form.cycle_choice(true);
        assert!(form.input(LocationField::Name).is_empty());
    }

    #[test]
    fn test_location_form_to_data() {
        let mut form = LocationForm::default();
        for c in " HQ ".chars() {
            form.focused_input_mut().insert(c);
        }
        form.prev_field();
        assert_eq!(form.focused_field(), LocationField::Timezone);
        form.cycle_choice(true);

        let data = form.to_data();
        assert_eq!(data.name, "HQ");
        assert_eq!(data.timezone, "America/New_York");
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_pstn_wizard_pages() {
        let mut form = PstnForm::default();
        let data = form.confirm().unwrap();
        assert_eq!(data.connection_type, ConnectionType::Cisco);

        form.nav_down();
        assert_eq!(form.selected_type(), ConnectionType::CloudConnected);
        assert!(form.confirm().is_none());
        assert_eq!(form.page, PstnPage::Provider);

        form.nav_down();
        let data = form.confirm().unwrap();
        assert_eq!(data.provider.as_deref(), Some("bandwidth"));

        assert!(form.back());
        assert!(!form.back());
    }

    #[test]
    fn test_pstn_nav_clamps() {
        let mut form = PstnForm::default();
        form.nav_up();
        assert_eq!(form.selected_type(), ConnectionType::Cisco);
        for _ in 0..10 {
            form.nav_down();
        }
        assert_eq!(form.selected_type(), ConnectionType::PremisesBased);
    }

    #[test]
    fn test_phone_numbers_form() {
        let mut form = PhoneNumbersForm::default();
        form.input.set("4507832223, 4507832224");
        form.activate_later = true;

        let data = form.to_data();
        assert_eq!(data.numbers.len(), 2);
        assert!(data.activate_later);
    }

    #[test]
    fn test_form_state_errors() {
        let mut form = FormState::for_modal(Modal::PhoneNumbers);
        assert_eq!(form.modal(), Modal::PhoneNumbers);
        assert!(form.error().is_none());
        form.set_error("Add at least one phone number".into());
        assert_eq!(form.error(), Some("Add at least one phone number"));
    }
}
