use crate::config::Config;
use crate::error::CarbonError;
use crate::integrations::{ReportMailer, ReportRequest};
use crate::logic::rules::email_suggestions;
use crate::logic::{assistant, estimate, RulesEngine, SustainabilityAssistant};
use crate::models::{
    limits, ChatTranscript, DietType, ElectricitySource, EmissionBreakdown, HouseholdProfile,
    Suggestion, VehicleType,
};
use crate::ui::screens::CalculatorField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Calculator,
    Results,
    Chat,
    Resources,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Home),
            '2' => Some(Screen::Calculator),
            '3' => Some(Screen::Results),
            '4' => Some(Screen::Chat),
            '5' => Some(Screen::Resources),
            _ => None,
        }
    }
}

pub struct CalculatorState {
    pub focused_field: CalculatorField,
    pub editing: bool,
    pub edit_buffer: String,
}

impl CalculatorState {
    pub fn new() -> Self {
        Self {
            focused_field: CalculatorField::Email,
            editing: false,
            edit_buffer: String::new(),
        }
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn start_editing(&mut self, current_value: &str) {
        self.editing = true;
        self.edit_buffer = current_value.to_string();
    }

    pub fn cancel_editing(&mut self) {
        self.editing = false;
        self.edit_buffer.clear();
    }

    pub fn finish_editing(&mut self) -> String {
        self.editing = false;
        std::mem::take(&mut self.edit_buffer)
    }
}

pub struct ChatState {
    pub typing: bool,
    pub input: String,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            typing: false,
            input: String::new(),
        }
    }
}

/// Outcome of the last calculation, kept for the results screen.
#[derive(Debug, Clone)]
pub struct Footprint {
    pub profile: HouseholdProfile,
    pub emissions: EmissionBreakdown,
    pub suggestions: Vec<Suggestion>,
}

impl Footprint {
    pub fn per_capita(&self) -> f64 {
        self.emissions.per_capita(self.profile.household_size)
    }

    pub fn top_suggestion(&self) -> Option<&Suggestion> {
        self.suggestions.first()
    }

    pub fn email_suggestions(&self) -> &[Suggestion] {
        email_suggestions(&self.suggestions)
    }
}

/// Outbound call queued by an input handler, run by the main loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    SendReport,
    AskChat(String),
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,

    // Form
    pub profile: HouseholdProfile,
    pub email: String,
    pub name: String,

    // Results
    pub footprint: Option<Footprint>,
    pub transcript: ChatTranscript,

    // Screen states
    pub calculator_state: CalculatorState,
    pub chat_state: ChatState,

    // Services
    pub rules_engine: RulesEngine,
    pub assistant: SustainabilityAssistant,
    pub mailer: ReportMailer,

    // UI state
    pub status_message: Option<String>,
    pub pending: Option<PendingAction>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let assistant = SustainabilityAssistant::new(&config.gemini);
        let mailer = ReportMailer::new(config.mail.clone());

        Self {
            screen: Screen::Home,
            should_quit: false,
            profile: config.defaults.clamped(),
            email: config.user.email.clone().unwrap_or_default(),
            name: config.user.name.clone(),
            footprint: None,
            transcript: ChatTranscript::new(),
            calculator_state: CalculatorState::new(),
            chat_state: ChatState::new(),
            rules_engine: RulesEngine::new(),
            assistant,
            mailer,
            status_message: None,
            pending: None,
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// True while keystrokes belong to a text field rather than navigation.
    pub fn is_typing(&self) -> bool {
        self.calculator_state.editing || self.chat_state.typing
    }

    /// Score the current form, select suggestions and queue the report
    /// email when an address was entered.
    pub fn calculate(&mut self) {
        let profile = self.profile.clamped();
        let emissions = estimate(&profile);
        let suggestions = self.rules_engine.evaluate(&profile, &emissions);

        tracing::info!(
            total = emissions.total(),
            suggestions = suggestions.len(),
            "footprint calculated"
        );

        self.footprint = Some(Footprint {
            profile,
            emissions,
            suggestions,
        });
        self.switch_screen(Screen::Results);

        let message = format!(
            "Estimated monthly emissions: {:.2} kg CO₂e",
            emissions.total()
        );
        if self.email.trim().is_empty() {
            self.set_status(&format!(
                "{} - enter your email in the calculator to receive the report",
                message
            ));
        } else {
            self.set_status(&format!("{} - sending report...", message));
            self.pending = Some(PendingAction::SendReport);
        }
    }

    /// Queue a chat question. Blank input is rejected here and never
    /// reaches the service.
    pub fn submit_chat(&mut self) {
        let input = std::mem::take(&mut self.chat_state.input);
        match assistant::validate_question(&input) {
            Ok(question) => {
                self.pending = Some(PendingAction::AskChat(question.to_string()));
                self.set_status("Waiting for reply...");
            }
            Err(e) => self.set_status(&e.to_string()),
        }
    }

    /// Run the queued outbound call, if any. Failures end up in the status
    /// line or the transcript; nothing here is fatal.
    pub async fn process_pending(&mut self) {
        let Some(action) = self.pending.take() else {
            return;
        };

        match action {
            PendingAction::SendReport => {
                let Some(footprint) = self.footprint.as_ref() else {
                    return;
                };
                let request = ReportRequest {
                    to: &self.email,
                    name: &self.name,
                    emissions: footprint.emissions,
                    profile: Some(&footprint.profile),
                    suggestions: footprint.email_suggestions(),
                };
                let outcome = self.mailer.send(&request).await;
                self.set_status(&outcome.message);
            }
            PendingAction::AskChat(question) => match self.assistant.ask(&question).await {
                Ok(reply) => {
                    self.transcript.record_exchange(&question, &reply);
                    self.clear_status();
                }
                Err(CarbonError::EmptyQuestion) => {
                    self.set_status(&CarbonError::EmptyQuestion.to_string());
                }
                Err(e) => {
                    tracing::error!("Chat failed: {}", e);
                    self.set_status(&format!("Chat failed: {}", e));
                }
            },
        }
    }

    pub fn field_value(&self, field: CalculatorField) -> String {
        let p = &self.profile;
        match field {
            CalculatorField::Email => self.email.clone(),
            CalculatorField::Name => self.name.clone(),
            CalculatorField::Electricity => format_number(p.electricity_kwh),
            CalculatorField::ElectricitySource => p.electricity_source.label().to_string(),
            CalculatorField::Lpg => format_number(p.lpg_kg),
            CalculatorField::VehicleType => p.vehicle_type.as_str().to_string(),
            CalculatorField::Travel => format_number(p.travel_km),
            CalculatorField::Efficiency => format_number(p.vehicle_efficiency),
            CalculatorField::Diet => p.diet.as_str().to_string(),
            CalculatorField::Waste => format_number(p.waste_kg),
            CalculatorField::Household => p.household_size.to_string(),
            CalculatorField::Renewable => format_number(p.renewable_percent),
        }
    }

    /// Apply an edited value. Numbers are clamped to their range; text that
    /// does not parse leaves the field unchanged.
    pub fn apply_field_value(&mut self, field: CalculatorField, value: &str) {
        let value = value.trim();
        let p = &mut self.profile;

        let applied = match field {
            CalculatorField::Email => {
                self.email = value.to_string();
                true
            }
            CalculatorField::Name => {
                self.name = if value.is_empty() {
                    "User".to_string()
                } else {
                    value.to_string()
                };
                true
            }
            CalculatorField::Electricity => set_quantity(&mut p.electricity_kwh, value),
            CalculatorField::Lpg => set_quantity(&mut p.lpg_kg, value),
            CalculatorField::Travel => set_quantity(&mut p.travel_km, value),
            CalculatorField::Efficiency => set_quantity(&mut p.vehicle_efficiency, value),
            CalculatorField::Waste => set_quantity(&mut p.waste_kg, value),
            CalculatorField::Renewable => match value.parse::<f64>() {
                Ok(v) if v.is_finite() => {
                    p.renewable_percent =
                        v.clamp(limits::MIN_QUANTITY, limits::MAX_RENEWABLE_PERCENT);
                    true
                }
                _ => false,
            },
            CalculatorField::Household => match value.parse::<f64>() {
                Ok(v) if v.is_finite() => {
                    p.household_size = (v.round() as i64).max(limits::MIN_HOUSEHOLD);
                    true
                }
                _ => false,
            },
            CalculatorField::ElectricitySource => match ElectricitySource::from_str(value) {
                Some(source) => {
                    p.electricity_source = source;
                    true
                }
                None => false,
            },
            CalculatorField::VehicleType => match VehicleType::from_str(value) {
                Some(vehicle) => {
                    p.vehicle_type = vehicle;
                    true
                }
                None => false,
            },
            CalculatorField::Diet => match DietType::from_str(value) {
                Some(diet) => {
                    p.diet = diet;
                    true
                }
                None => false,
            },
        };

        if !applied {
            self.set_status(&format!("Invalid value for {}: '{}'", field.label(), value));
        }
    }

    /// Step a select field through its options.
    pub fn cycle_option(&mut self, field: CalculatorField, forward: bool) {
        let p = &mut self.profile;
        match field {
            CalculatorField::ElectricitySource => {
                p.electricity_source = cycle(ElectricitySource::ALL, p.electricity_source, forward)
            }
            CalculatorField::VehicleType => {
                p.vehicle_type = cycle(VehicleType::ALL, p.vehicle_type, forward)
            }
            CalculatorField::Diet => p.diet = cycle(DietType::ALL, p.diet, forward),
            _ => {}
        }
    }
}

fn set_quantity(target: &mut f64, value: &str) -> bool {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => {
            *target = v.max(limits::MIN_QUANTITY);
            true
        }
        _ => false,
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    let len = options.len();
    let index = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    options[next]
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(Config::default())
    }

    #[test]
    fn calculate_example_profile() {
        let mut app = app();
        app.apply_field_value(CalculatorField::Electricity, "150");
        app.apply_field_value(CalculatorField::Travel, "300");
        app.apply_field_value(CalculatorField::Waste, "20");
        app.apply_field_value(CalculatorField::Diet, "mixed");
        app.calculate();

        let footprint = app.footprint.as_ref().unwrap();
        assert_eq!(format!("{:.2}", footprint.emissions.total()), "169.00");
        assert_eq!(app.screen, Screen::Results);
        assert!(footprint.suggestions.len() >= 3);
        // No address entered, so nothing is queued.
        assert_eq!(app.pending, None);
    }

    #[test]
    fn calculate_with_email_queues_report() {
        let mut app = app();
        app.apply_field_value(CalculatorField::Email, "asha@example.com");
        app.calculate();
        assert_eq!(app.pending, Some(PendingAction::SendReport));
    }

    #[test]
    fn numeric_fields_clamp_and_reject_garbage() {
        let mut app = app();
        app.apply_field_value(CalculatorField::Electricity, "-40");
        assert_eq!(app.profile.electricity_kwh, 0.0);

        app.apply_field_value(CalculatorField::Renewable, "250");
        assert_eq!(app.profile.renewable_percent, 100.0);

        app.apply_field_value(CalculatorField::Household, "0");
        assert_eq!(app.profile.household_size, 1);

        app.apply_field_value(CalculatorField::Waste, "lots");
        assert_eq!(app.profile.waste_kg, 20.0);
        assert!(app.status_message.as_deref().unwrap().contains("Invalid value"));
    }

    #[test]
    fn cycle_option_wraps() {
        let mut app = app();
        assert_eq!(app.profile.vehicle_type, VehicleType::Car);
        app.cycle_option(CalculatorField::VehicleType, false);
        assert_eq!(app.profile.vehicle_type, VehicleType::None);
        app.cycle_option(CalculatorField::VehicleType, true);
        assert_eq!(app.profile.vehicle_type, VehicleType::Car);
    }

    #[test]
    fn blank_chat_question_is_not_queued() {
        let mut app = app();
        app.chat_state.input = "   ".into();
        app.submit_chat();

        assert_eq!(app.pending, None);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Please type a question first.")
        );
        assert!(app.transcript.is_empty());
    }

    #[tokio::test]
    async fn chat_without_key_records_not_configured_reply() {
        let mut app = app();
        app.chat_state.input = "  How do I compost?  ".into();
        app.submit_chat();
        assert_eq!(
            app.pending,
            Some(PendingAction::AskChat("How do I compost?".into()))
        );

        app.process_pending().await;
        let entries = app.transcript.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "How do I compost?");
        assert_eq!(entries[1].text, assistant::NOT_CONFIGURED_REPLY);
        assert_eq!(app.pending, None);
    }

    #[tokio::test]
    async fn report_without_mail_config_sets_error_status() {
        let mut app = app();
        app.apply_field_value(CalculatorField::Email, "asha@example.com");
        app.calculate();
        app.process_pending().await;

        let status = app.status_message.as_deref().unwrap();
        assert!(status.starts_with("Error sending email:"), "got {}", status);
    }

    #[test]
    fn field_value_formats_numbers() {
        let mut app = app();
        assert_eq!(app.field_value(CalculatorField::Electricity), "150");
        app.apply_field_value(CalculatorField::Lpg, "12.5");
        assert_eq!(app.field_value(CalculatorField::Lpg), "12.5");
        assert_eq!(app.field_value(CalculatorField::Name), "User");
    }
}
