//! # BMI Calculator GUI Application
//!
//! Desktop interface for entering height/weight pairs, appending them to
//! data files, and processing whole files into BMI tables.
//! Built with Iced; the native file picker comes from rfd.
//!
//! All UI state lives in [`App`]. Panels in [`ui`] borrow it to render and
//! return [`Message`]s; [`App::update`] is the only place state changes.

mod ui;

use std::path::{Path, PathBuf};

use iced::widget::{column, container, row, rule};
use iced::{Element, Length, Task, Theme};
use tracing::{error, info, Level};

use bmi_core::bmi::{CategoryConvention, Measurement};
use bmi_core::record_store;
use bmi_core::settings::{settings_path, AppSettings, ThemeMode};
use bmi_core::table::MeasurementTable;
use bmi_core::CalcError;

pub fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::WARN.into()))
        .init();

    iced::application(App::new, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window_size((1280.0, 800.0))
        .run()
}

/// Which page the content area shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Welcome,
    Entry,
    Process,
}

/// Sidebar menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    EnterData,
    ProcessData,
    ToggleTheme,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::EnterData,
        MenuItem::ProcessData,
        MenuItem::ToggleTheme,
        MenuItem::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::EnterData => "Enter Data",
            MenuItem::ProcessData => "Process Data",
            MenuItem::ToggleTheme => "Toggle Theme",
            MenuItem::Exit => "Exit",
        }
    }

    /// The page this item opens, if it opens one
    pub fn view(&self) -> Option<View> {
        match self {
            MenuItem::EnterData => Some(View::Entry),
            MenuItem::ProcessData => Some(View::Process),
            MenuItem::ToggleTheme | MenuItem::Exit => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    MenuSelected(MenuItem),

    // Entry view
    HeightChanged(String),
    WeightChanged(String),
    FileNameChanged(String),
    AddEntry,
    ShowData,

    // Process view
    ChooseFile,
    FileChosen(Option<PathBuf>),
    ProcessData,
    SaveResults,

    DismissStatus,
}

/// Text fields and table of the data entry page
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    pub height: String,
    pub weight: String,
    pub file_name: String,
    pub table: MeasurementTable,
}

/// Loaded source file and results of the processing page
#[derive(Debug, Clone, Default)]
pub struct ProcessState {
    pub source: Option<PathBuf>,
    pub measurements: Vec<Measurement>,
    /// Filled by "Process", cleared whenever a new file is loaded
    pub processed: Option<MeasurementTable>,
}

impl ProcessState {
    pub fn can_process(&self) -> bool {
        self.source.is_some()
    }

    pub fn can_save(&self) -> bool {
        self.source.is_some() && self.processed.is_some()
    }
}

/// Transient message shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        StatusMessage {
            text: text.into(),
            is_error: true,
        }
    }
}

pub struct App {
    pub settings: AppSettings,
    settings_path: PathBuf,
    pub view: View,
    pub entry: EntryForm,
    pub process: ProcessState,
    pub status: Option<StatusMessage>,
}

impl App {
    fn new() -> Self {
        let path = settings_path();
        let settings = AppSettings::load_or_default(&path);
        info!(settings = %path.display(), convention = %settings.convention, "starting BMI calculator");
        App::with_settings(settings, path)
    }

    pub fn with_settings(settings: AppSettings, settings_path: PathBuf) -> Self {
        let convention = settings.convention;
        App {
            settings,
            settings_path,
            view: View::default(),
            entry: EntryForm {
                table: MeasurementTable::new(convention),
                ..EntryForm::default()
            },
            process: ProcessState::default(),
            status: None,
        }
    }

    fn title(&self) -> String {
        "BMI Calculator".to_string()
    }

    fn theme(&self) -> Theme {
        match self.settings.theme {
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::Light => Theme::Light,
        }
    }

    pub fn convention(&self) -> CategoryConvention {
        self.settings.convention
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::MenuSelected(item) => return self.select_menu(item),

            Message::HeightChanged(value) => self.entry.height = value,
            Message::WeightChanged(value) => self.entry.weight = value,
            Message::FileNameChanged(value) => self.entry.file_name = value,
            Message::AddEntry => self.add_entry(),
            Message::ShowData => self.show_data(),

            Message::ChooseFile => {
                let start_dir = self.settings.data_dir.clone();
                return Task::perform(pick_data_file(start_dir), Message::FileChosen);
            }
            Message::FileChosen(Some(path)) => self.load_source(path),
            Message::FileChosen(None) => {}
            Message::ProcessData => self.process_data(),
            Message::SaveResults => self.save_results(),

            Message::DismissStatus => self.status = None,
        }
        Task::none()
    }

    fn select_menu(&mut self, item: MenuItem) -> Task<Message> {
        match item {
            MenuItem::EnterData | MenuItem::ProcessData => {
                if let Some(view) = item.view() {
                    self.view = view;
                }
            }
            MenuItem::ToggleTheme => {
                self.settings.theme = self.settings.theme.toggled();
                if let Err(e) = self.settings.save(&self.settings_path) {
                    error!(error = %e, "could not save settings");
                    self.set_error(&e);
                }
            }
            MenuItem::Exit => {
                info!("exit requested");
                return iced::exit();
            }
        }
        Task::none()
    }

    /// Validate the form, append to the named file, and add a table row.
    fn add_entry(&mut self) {
        let path = match self.entry_file_path() {
            Ok(path) => path,
            Err(e) => return self.set_error(&e),
        };
        let measurement = match Measurement::parse(&self.entry.height, &self.entry.weight) {
            Ok(m) => m,
            Err(e) => return self.set_error(&e),
        };

        if let Err(e) = record_store::append(&path, &measurement) {
            error!(path = %path.display(), error = %e, "append failed");
            self.status = Some(StatusMessage::error(format!("Error saving data: {}", e.user_message())));
            return;
        }

        let record = *self.entry.table.push(measurement);
        info!(path = %path.display(), bmi = record.bmi, category = %record.category, "entry added");

        self.entry.height.clear();
        self.entry.weight.clear();
        self.status = Some(StatusMessage::info("Data saved successfully"));
    }

    /// Replace the entry table with the contents of the named file.
    fn show_data(&mut self) {
        let path = match self.entry_file_path() {
            Ok(path) => path,
            Err(e) => return self.set_error(&e),
        };

        match record_store::load(&path) {
            Ok(measurements) => {
                self.entry.table = MeasurementTable::from_measurements(&measurements, self.convention());
                self.status = Some(StatusMessage::info(format!(
                    "Loaded {} records from {}",
                    measurements.len(),
                    path.display()
                )));
            }
            Err(e) => {
                self.status = Some(StatusMessage::error(format!("Error loading data: {}", e.user_message())));
            }
        }
    }

    fn entry_file_path(&self) -> Result<PathBuf, CalcError> {
        record_store::data_file_path(&self.settings.data_dir, &self.entry.file_name)
    }

    /// Load a raw data file picked on the processing page.
    fn load_source(&mut self, path: PathBuf) {
        match record_store::load_or_empty(&path) {
            Ok(measurements) => {
                info!(path = %path.display(), count = measurements.len(), "source file loaded");
                self.status = Some(StatusMessage::info(format!(
                    "Loaded {} records from {}",
                    measurements.len(),
                    display_name(&path)
                )));
                self.process = ProcessState {
                    source: Some(path),
                    measurements,
                    processed: None,
                };
            }
            Err(e) => {
                self.status = Some(StatusMessage::error(format!("Error loading data: {}", e.user_message())));
            }
        }
    }

    fn process_data(&mut self) {
        if !self.process.can_process() {
            return;
        }
        let table = MeasurementTable::from_measurements(&self.process.measurements, self.convention());
        info!(count = table.len(), "processed measurements");
        self.process.processed = Some(table);
    }

    /// Overwrite the source file with the processed rows.
    fn save_results(&mut self) {
        let (Some(path), Some(table)) = (&self.process.source, &self.process.processed) else {
            return;
        };

        self.status = Some(match record_store::overwrite_with_processed(path, table.records()) {
            Ok(()) => {
                info!(path = %path.display(), count = table.len(), "results saved");
                StatusMessage::info("Results saved successfully")
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "save failed");
                StatusMessage::error(format!("Error saving results: {}", e.user_message()))
            }
        });
    }

    fn set_error(&mut self, e: &CalcError) {
        self.status = Some(StatusMessage::error(e.user_message()));
    }

    fn view(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = match self.view {
            View::Welcome => ui::welcome::view(),
            View::Entry => ui::entry_view::view(&self.entry),
            View::Process => ui::process_view::view(&self.process),
        };

        let main_row = row![
            ui::sidebar::view_sidebar(self.view),
            rule::vertical(1),
            container(content).width(Length::Fill).height(Length::Fill).padding(20),
        ]
        .height(Length::Fill);

        column![main_row, ui::status_bar::view_status_bar(self.status.as_ref(), self.convention())].into()
    }
}

/// Show the native open dialog filtered to data files.
async fn pick_data_file(start_dir: PathBuf) -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Choose a data file")
        .add_filter("Text files", &[record_store::DATA_FILE_EXTENSION])
        .set_directory(&start_dir)
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
