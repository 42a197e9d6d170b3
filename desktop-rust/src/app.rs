use chrono::Local;
use eframe::egui::{self, Color32, RichText};

use crate::io::{open_session, with_work_dir};
use crate::model::{AppState, NotesEditor, Popup, Screen};
use building_check::config::Config;
use building_check_common::checklist::{STATUS_ISSUE, STATUS_OK};
use building_check_common::{Error as CommonError, RoomProgress, Session};

const NO_CHECK_FOUND: &str =
    "No previous check found. Ensure check files exist in the current directory.";

pub struct DesktopApp {
    config: Config,
    session: Session,
    state: AppState,
}

/// 画面操作（描画後にまとめて適用する）
enum Action {
    NewCheck,
    ResumeCheck,
    OpenFolder,
    SelectFloor(String),
    SelectRoom(String),
    Record {
        room: String,
        item: String,
        index: usize,
        status: &'static str,
    },
    EditNotes(NotesEditor),
    SaveNotes,
    CancelNotes,
    ClosePopup,
    Back,
    Home,
}

impl DesktopApp {
    pub fn new(config: Config) -> Self {
        let session = open_session(&config);
        let mut state = AppState::default();
        if session.plan().is_empty() {
            state.status = format!("No floors loaded from {}", config.floors_path().display());
        }
        Self { config, session, state }
    }

    fn show_error(&mut self, title: &str, message: impl Into<String>) {
        self.state.popup = Some(Popup {
            title: title.to_string(),
            message: message.into(),
        });
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::NewCheck => {
                let log_path = self.session.start_new(Local::now().date_naive());
                self.state.status = format!("New check: {}", log_path.display());
                self.state.screen = Screen::FloorSelect;
            }
            Action::ResumeCheck => match self.session.resume() {
                Ok(log_path) => {
                    self.state.status = format!("Resumed {}", log_path.display());
                    self.state.screen = Screen::FloorSelect;
                }
                Err(CommonError::NoSessionFound(_)) => self.show_error("Error", NO_CHECK_FOUND),
                Err(err) => self.show_error("Error", err.to_string()),
            },
            Action::OpenFolder => {
                if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                    self.config = with_work_dir(&self.config, &folder);
                    self.session = open_session(&self.config);
                    self.state = AppState {
                        status: format!("Folder {}", folder.display()),
                        ..AppState::default()
                    };
                }
            }
            Action::SelectFloor(floor) => match self.session.select_floor(&floor) {
                Ok(_) => self.state.screen = Screen::RoomList { floor },
                Err(err) => self.show_error("Error", err.to_string()),
            },
            Action::SelectRoom(room) => {
                let floor = self.session.current_floor().unwrap_or_default().to_string();
                match self.session.select_room(&room) {
                    Ok(_) => self.state.screen = Screen::RoomCheck { floor, room },
                    Err(err) => self.show_error("Error", err.to_string()),
                }
            }
            Action::Record { room, item, index, status } => {
                match self.session.record_status(&room, &item, index, status) {
                    Ok(()) => self.state.status = "Saved".to_string(),
                    Err(err) => self.show_error("Error", err.to_string()),
                }
            }
            Action::EditNotes(editor) => self.state.notes = Some(editor),
            Action::SaveNotes => {
                if let Some(editor) = self.state.notes.take() {
                    match self.session.record_notes(&editor.room, &editor.item, editor.index, &editor.text) {
                        Ok(()) => self.state.status = format!("Notes saved for {}", editor.label),
                        Err(err) => self.show_error("Error", err.to_string()),
                    }
                }
            }
            Action::CancelNotes => self.state.notes = None,
            Action::ClosePopup => self.state.popup = None,
            Action::Back => self.state.screen = self.state.screen.back(),
            Action::Home => {
                log::info!("Navigating back to the home screen.");
                self.state.screen = Screen::Home;
            }
        }
    }

    fn render_home(&self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.heading(RichText::new("IESLH Building Check").size(32.0));
            ui.add_space(24.0);
            let size = [ui.available_width() * 0.8, 60.0];
            if ui.add_sized(size, egui::Button::new("New Check")).on_hover_text("Start a new building check.").clicked() {
                actions.push(Action::NewCheck);
            }
            ui.add_space(8.0);
            if ui.add_sized(size, egui::Button::new("Resume Check")).on_hover_text("Resume the last saved building check.").clicked() {
                actions.push(Action::ResumeCheck);
            }
            ui.add_space(16.0);
            ui.label(RichText::new(format!("Folder: {}", self.config.work_dir.display())).color(Color32::from_gray(170)));
            if ui.button("Open Folder").clicked() {
                actions.push(Action::OpenFolder);
            }
        });
    }

    fn render_floors(&self, ui: &mut egui::Ui, actions: &mut Vec<Action>) {
        let width = ui.available_width();
        for floor in self.session.floors() {
            if ui.add_sized([width, 40.0], egui::Button::new(format!("Floor {floor}"))).clicked() {
                actions.push(Action::SelectFloor(floor.to_string()));
            }
        }
    }

    fn render_rooms(&self, ui: &mut egui::Ui, floor: &str, actions: &mut Vec<Action>) {
        let Some(rooms) = self.session.plan().rooms(floor) else {
            ui.label(format!("Unknown floor {floor}"));
            return;
        };

        let width = ui.available_width();
        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            for room in rooms.keys() {
                let progress = self.session.state().progress(room).unwrap_or(RoomProgress::NotChecked);
                let button = egui::Button::new(
                    RichText::new(format!("Room {room}: {progress}")).color(Color32::BLACK),
                )
                .fill(progress_color(progress));
                if ui.add_sized([width, 40.0], button).clicked() {
                    actions.push(Action::SelectRoom(room.clone()));
                }
            }
        });
    }

    fn render_room(&self, ui: &mut egui::Ui, room: &str, actions: &mut Vec<Action>) {
        let summary = match self.session.summarize(room) {
            Ok(summary) => summary,
            Err(err) => {
                ui.label(err.to_string());
                return;
            }
        };

        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            egui::Grid::new("room_grid").striped(true).min_col_width(60.0).show(ui, |ui| {
                for entry in &summary.entries {
                    let text = RichText::new(entry.to_string());
                    ui.label(if entry.status.is_some() { text.strong() } else { text });

                    let record = |status: &'static str| Action::Record {
                        room: room.to_string(),
                        item: entry.item.as_str().to_string(),
                        index: entry.index,
                        status,
                    };
                    if ui.button("OK").clicked() {
                        actions.push(record(STATUS_OK));
                    }
                    if ui.button("Issue").clicked() {
                        actions.push(record(STATUS_ISSUE));
                    }
                    if ui.button("Notes").clicked() {
                        actions.push(Action::EditNotes(NotesEditor {
                            room: room.to_string(),
                            item: entry.item.as_str().to_string(),
                            index: entry.index,
                            label: entry.label(),
                            text: entry.notes.clone(),
                        }));
                    }
                    ui.label(RichText::new(&entry.notes).color(Color32::from_gray(170)).size(12.0));
                    ui.end_row();
                }
            });
        });
    }
}

fn progress_color(progress: RoomProgress) -> Color32 {
    match progress {
        RoomProgress::FullyChecked => Color32::from_rgb(80, 200, 90),
        RoomProgress::PartiallyChecked => Color32::from_rgb(240, 210, 60),
        RoomProgress::NotChecked => Color32::from_rgb(220, 80, 70),
    }
}

impl eframe::App for DesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();
        let screen = self.state.screen.clone();

        if screen != Screen::Home {
            egui::TopBottomPanel::top("nav").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Back").on_hover_text("Go back to the previous screen.").clicked() {
                        actions.push(Action::Back);
                    }
                    ui.separator();
                    ui.heading(screen.title());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Home").on_hover_text("Return to the main menu.").clicked() {
                            actions.push(Action::Home);
                        }
                    });
                });
            });
        }

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(RichText::new(&self.state.status).color(Color32::from_gray(170)));
        });

        egui::CentralPanel::default().show(ctx, |ui| match &screen {
            Screen::Home => self.render_home(ui, &mut actions),
            Screen::FloorSelect => self.render_floors(ui, &mut actions),
            Screen::RoomList { floor } => self.render_rooms(ui, floor, &mut actions),
            Screen::RoomCheck { room, .. } => self.render_room(ui, room, &mut actions),
        });

        if let Some(editor) = &mut self.state.notes {
            egui::Window::new(format!("Notes: {}", editor.label))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut editor.text)
                            .hint_text("Enter your notes here")
                            .desired_rows(6),
                    );
                    ui.horizontal(|ui| {
                        if ui.button("Save").clicked() {
                            actions.push(Action::SaveNotes);
                        }
                        if ui.button("Cancel").clicked() {
                            actions.push(Action::CancelNotes);
                        }
                    });
                });
        }

        if let Some(popup) = &self.state.popup {
            egui::Window::new(popup.title.as_str())
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(popup.message.as_str());
                    if ui.button("Close").clicked() {
                        actions.push(Action::ClosePopup);
                    }
                });
        }

        for action in actions {
            self.apply(action);
        }
    }
}
