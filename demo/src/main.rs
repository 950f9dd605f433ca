use eframe::{run_native, App, CreationContext, NativeOptions};
use egui::{Align2, Button, Color32, Context, Frame, RichText, Vec2, Window};
use workflow_canvas::{
    panel_items, parse_csv, CanvasView, Minimap, NodeKind, NodePayload, Selection, Workflow,
};

#[derive(Default)]
struct UploadState {
    open: bool,
    dataset_name: String,
    csv_text: String,
    error: Option<String>,
}

#[derive(Default)]
struct DemoApp {
    workflow: Workflow,
    upload: UploadState,
}

impl DemoApp {
    fn new(_: &CreationContext<'_>) -> Self {
        Self::default()
    }

    fn top_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Feature Explorer");
                if self.workflow.has_unsaved_changes() {
                    ui.label(RichText::new("unsaved changes").weak().italics());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Save").clicked() {
                        self.workflow.mark_saved();
                        log::info!("workflow saved");
                    }
                    if ui.button("Export").clicked() {
                        log::info!("export requested");
                    }
                    if ui.button("Generate insights").clicked() {
                        if self.workflow.has_dataset() {
                            log::info!("generating insights for the current datasets");
                        } else {
                            self.upload.open = true;
                        }
                    }
                    if ui.button("Import data").clicked() {
                        self.upload.open = true;
                    }
                    ui.separator();
                    // Not wired to a history stack yet.
                    ui.add_enabled(false, Button::new("Redo"));
                    ui.add_enabled(false, Button::new("Undo"));
                });
            });
        });
    }

    fn detail_panel(&mut self, ctx: &Context) {
        let selection = self.workflow.selection().clone();
        match selection {
            Selection::Idle => {}
            Selection::Node(id) => {
                let Some(node) = self.workflow.node(&id) else {
                    return;
                };
                let name = node.name().to_string();
                let kind = node.kind();
                let dismissable = matches!(node.payload(), NodePayload::Insight(_));

                egui::SidePanel::right("detail_panel")
                    .default_width(220.)
                    .show(ctx, |ui| {
                        ui.heading(&name);
                        ui.label(kind.as_str());
                        ui.separator();
                        if dismissable && ui.button("Dismiss insight").clicked() {
                            self.workflow.remove_node(&id);
                        }
                    });
            }
            Selection::Connection(id) => {
                let Some(connection) = self.workflow.connection(&id) else {
                    return;
                };
                let kind = connection.kind();
                let value = connection.correlation_value;
                let conn_id = id.clone();

                egui::SidePanel::right("detail_panel")
                    .default_width(220.)
                    .show(ctx, |ui| {
                        ui.heading("Connection");
                        ui.label(kind.as_str());
                        if let Some(value) = value {
                            ui.label(format!("correlation {value:.2}"));
                        }
                        ui.separator();
                        if ui.button("Remove connection").clicked() {
                            self.workflow.remove_connection(&conn_id);
                        }
                    });
            }
        }
    }

    fn empty_state(&mut self, ctx: &Context) {
        egui::Area::new(egui::Id::new("empty_state"))
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                Frame::window(&ctx.style()).show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Your canvas is empty");
                        ui.label("Import a dataset or load the sample workflow to start.");
                        ui.add_space(8.);
                        ui.horizontal(|ui| {
                            if ui.button("Import data").clicked() {
                                self.upload.open = true;
                            }
                            if ui.button("Load sample").clicked() {
                                self.workflow.load_sample();
                            }
                        });
                    });
                });
            });
    }

    fn floating_panel(&mut self, ctx: &Context) {
        if !self.workflow.panel().open {
            return;
        }
        let pos = self.workflow.panel().screen_pos;

        Window::new("add_item_panel")
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .fixed_pos(pos)
            .show(ctx, |ui| {
                let mut category = "";
                for item in panel_items() {
                    if item.category != category {
                        category = item.category;
                        ui.label(RichText::new(category).weak().small());
                    }
                    if ui.button(item.label).on_hover_text(item.description).clicked() {
                        match item.id {
                            "dataset" => self.upload.open = true,
                            other => log::info!("tool '{other}' is not wired up yet"),
                        }
                        self.workflow.panel_mut().close();
                    }
                }
            });
    }

    fn upload_window(&mut self, ctx: &Context) {
        if !self.upload.open {
            return;
        }
        let mut open = true;

        Window::new("Import dataset")
            .open(&mut open)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Dataset name");
                ui.text_edit_singleline(&mut self.upload.dataset_name);
                ui.label("Paste CSV content");
                ui.add(
                    egui::TextEdit::multiline(&mut self.upload.csv_text)
                        .desired_rows(8)
                        .code_editor(),
                );

                if let Some(error) = &self.upload.error {
                    ui.colored_label(Color32::from_rgb(0xf8, 0x71, 0x71), error);
                }

                if ui.button("Import").clicked() {
                    match parse_csv(&self.upload.csv_text) {
                        Ok(table) => {
                            let name = if self.upload.dataset_name.trim().is_empty() {
                                "Imported dataset"
                            } else {
                                self.upload.dataset_name.trim()
                            };
                            let id = self.workflow.import_table(&table, name, None);
                            log::info!(
                                "imported '{name}' as {id}: {} rows, {} columns",
                                table.row_count,
                                table.columns.len()
                            );
                            self.upload = UploadState::default();
                        }
                        Err(err) => self.upload.error = Some(err.to_string()),
                    }
                }
            });

        if !open {
            self.upload = UploadState::default();
        }
    }

    fn minimap(&mut self, ctx: &Context) {
        if self.workflow.is_empty() {
            return;
        }
        egui::Area::new(egui::Id::new("minimap"))
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-16., -16.))
            .show(ctx, |ui| {
                ui.add(Minimap::new(&self.workflow));
            });
    }
}

impl App for DemoApp {
    fn update(&mut self, ctx: &Context, _: &mut eframe::Frame) {
        self.top_bar(ctx);
        self.detail_panel(ctx);

        egui::CentralPanel::default()
            .frame(Frame::NONE)
            .show(ctx, |ui| {
                ui.add(&mut CanvasView::new(&mut self.workflow));
            });

        if self.workflow.is_empty() {
            self.empty_state(ctx);
        }
        self.floating_panel(ctx);
        self.upload_window(ctx);
        self.minimap(ctx);

        // Kind legend, mostly to prove the closed variant set.
        egui::Area::new(egui::Id::new("legend"))
            .anchor(Align2::LEFT_BOTTOM, Vec2::new(16., -16.))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for kind in [
                        NodeKind::Dataset,
                        NodeKind::Feature,
                        NodeKind::Insight,
                        NodeKind::Chart,
                        NodeKind::Transformation,
                    ] {
                        ui.colored_label(kind.color(), kind.as_str());
                    }
                });
            });
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    run_native(
        "Feature Explorer",
        NativeOptions::default(),
        Box::new(|cc| Ok(Box::new(DemoApp::new(cc)))),
    )
}
