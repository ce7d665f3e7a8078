#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use pump_power_calculator::{
    config,
    i18n::{self, keys},
    pump::{self, formula, GaugeModel, PumpParameters},
    telemetry,
};
use rfd::FileDialog;
use std::f32::consts::PI;
use std::{env, fs, path::Path};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(86, 204, 242);
const LANG_CHOICES: [&str; 3] = ["auto", "ko", "en"];

/// 설정 값을 콤보 항목(auto/ko/en) 중 하나로 맞춘다.
fn lang_choice(code: &str) -> &'static str {
    let c = code.trim().to_lowercase();
    if c.starts_with("ko") {
        "ko"
    } else if c.starts_with("en") {
        "en"
    } else {
        "auto"
    }
}

fn lang_label<'a>(tr: &'a i18n::Translator, code: &str) -> &'a str {
    match lang_choice(code) {
        "ko" => "한국어",
        "en" => "English",
        _ => tr.t(keys::SETTINGS_LANG_AUTO),
    }
}

fn main() -> Result<(), eframe::Error> {
    telemetry::init_tracing("info");

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/ko/en)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([520.0, 720.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::warn!(%err, "config load failed, using defaults");
            config::Config::default()
        }
    };
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Power Pump Calculator",
        native,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx, app_cfg.font_path.as_deref()) {
                tracing::warn!("font setup: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위한 폰트를 적용한다.
/// 1) 설정의 사용자 폰트
/// 2) assets/fonts/malgun.ttf
/// 3) Windows 시스템 폰트(맑은 고딕/굴림)
/// 모두 실패하면 기본 폰트를 유지하고 Err를 반환한다.
fn setup_fonts(ctx: &egui::Context, custom: Option<&str>) -> Result<(), String> {
    if let Some(path) = custom {
        return load_custom_font(ctx, path);
    }

    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc"] {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    Err("Korean font not found. Pick a font (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &str) -> Result<(), String> {
    let p = Path::new(path);
    if !p.exists() {
        return Err(format!("Font file not found: {path}"));
    }
    let bytes = fs::read(p).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

/// 게이지 비율(0~1)을 반원 위 각도(rad)로 바꾼다. 0은 왼쪽(π), 1은 오른쪽(0).
fn gauge_angle(fraction: f32) -> f32 {
    PI * (1.0 - fraction.clamp(0.0, 1.0))
}

fn arc_points(center: egui::Pos2, radius: f32, from: f32, to: f32) -> Vec<egui::Pos2> {
    const SEGMENTS: usize = 48;
    (0..=SEGMENTS)
        .map(|k| {
            let t = from + (to - from) * k as f32 / SEGMENTS as f32;
            let a = gauge_angle(t);
            egui::pos2(center.x + radius * a.cos(), center.y - radius * a.sin())
        })
        .collect()
}

/// 반원 게이지를 그린다.
fn gauge_ui(ui: &mut egui::Ui, model: &GaugeModel, title: &str) {
    let size = egui::vec2(ui.available_width().min(320.0), 190.0);
    let (resp, painter) = ui.allocate_painter(size, egui::Sense::hover());
    let rect = resp.rect;
    let center = egui::pos2(rect.center().x, rect.bottom() - 30.0);
    let radius = (size.x * 0.5 - 16.0).min(size.y - 50.0);
    let track = ui.visuals().widgets.noninteractive.bg_stroke.color;
    let frac = |kw: f64| model.fraction_of(kw) as f32;

    painter.add(egui::Shape::line(
        arc_points(center, radius, 0.0, 1.0),
        egui::Stroke::new(18.0, track.gamma_multiply(0.4)),
    ));
    for (band, alpha) in model.bands.iter().zip([0.2_f32, 0.4]) {
        painter.add(egui::Shape::line(
            arc_points(center, radius, frac(band.start), frac(band.end)),
            egui::Stroke::new(18.0, ACCENT.gamma_multiply(alpha)),
        ));
    }
    painter.add(egui::Shape::line(
        arc_points(center, radius - 14.0, 0.0, model.fraction() as f32),
        egui::Stroke::new(6.0, ACCENT),
    ));

    let a = gauge_angle(model.fraction() as f32);
    let tip = egui::pos2(
        center.x + (radius - 24.0) * a.cos(),
        center.y - (radius - 24.0) * a.sin(),
    );
    let text_color = ui.visuals().text_color();
    painter.line_segment([center, tip], egui::Stroke::new(2.0, text_color));
    painter.circle_filled(center, 4.0, text_color);

    let font = egui::FontId::proportional(12.0);
    painter.text(
        egui::pos2(center.x - radius, center.y + 14.0),
        egui::Align2::CENTER_CENTER,
        "0",
        font.clone(),
        text_color,
    );
    painter.text(
        egui::pos2(center.x + radius, center.y + 14.0),
        egui::Align2::CENTER_CENTER,
        format!("{:.2}", model.axis_max),
        font,
        text_color,
    );
    painter.text(
        egui::pos2(center.x, center.y - radius * 0.45),
        egui::Align2::CENTER_CENTER,
        format!("{:.2}", model.value),
        egui::FontId::proportional(22.0),
        text_color,
    );
    painter.text(
        egui::pos2(center.x, rect.top() + 8.0),
        egui::Align2::CENTER_TOP,
        title,
        egui::FontId::proportional(14.0),
        text_color,
    );
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    params: PumpParameters,
    show_gauge: bool,
    show_formula_modal: bool,
    show_settings_modal: bool,
    // 설정 입력
    lang_input: String,
    lang_pack_dir_input: String,
    font_path_input: String,
    settings_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        tracing::info!(lang = tr.language_code(), "gui language resolved");
        Self {
            params: config.defaults.clamped(),
            show_gauge: config.show_gauge,
            show_formula_modal: false,
            show_settings_modal: false,
            lang_input: lang_choice(&config.language).to_string(),
            lang_pack_dir_input: config.language_pack_dir.clone().unwrap_or_default(),
            font_path_input: config.font_path.clone().unwrap_or_default(),
            settings_status: None,
            config,
            tr,
        }
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        let p = &mut self.params;
        ui.columns(2, |cols| {
            cols[0].label(tr.t(keys::INPUT_DENSITY));
            cols[0].add(
                egui::DragValue::new(&mut p.fluid_density)
                    .speed(1.0)
                    .clamp_range(pump::power::MIN_FLUID_DENSITY..=f64::MAX),
            );
            cols[0].add_space(6.0);
            cols[0].label(tr.t(keys::INPUT_HEAD));
            cols[0].add(
                egui::DragValue::new(&mut p.head)
                    .speed(0.5)
                    .clamp_range(0.0..=f64::MAX),
            );

            cols[1].label(tr.t(keys::INPUT_FLOW));
            cols[1].add(
                egui::DragValue::new(&mut p.flow_rate)
                    .speed(1.0)
                    .clamp_range(0.0..=f64::MAX),
            );
            cols[1].add_space(6.0);
            cols[1].label(tr.t(keys::INPUT_EFFICIENCY));
            cols[1].add(egui::Slider::new(
                &mut p.efficiency_percent,
                pump::power::MIN_EFFICIENCY_PERCENT..=pump::power::MAX_EFFICIENCY_PERCENT,
            ));
        });
        if ui.button(tr.t(keys::BUTTON_RESET)).clicked() {
            self.params = self.config.defaults.clamped();
        }
    }

    fn ui_result(&mut self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        let params = self.params.clamped();
        match pump::compute(params) {
            Ok(power) => {
                egui::Frame::group(ui.style())
                    .stroke(egui::Stroke::new(1.0, ACCENT))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "🔹 {}",
                                tr.tf(keys::RESULT_POWER, &[("power", power.to_string())])
                            ))
                            .strong()
                            .size(18.0),
                        );
                        if let Ok(hydraulic) = pump::hydraulic_power_kw(params) {
                            ui.label(
                                egui::RichText::new(tr.tf(
                                    keys::RESULT_HYDRAULIC,
                                    &[("power", hydraulic.to_string())],
                                ))
                                .small(),
                            );
                        }
                    });
                if self.show_gauge {
                    ui.add_space(8.0);
                    gauge_ui(ui, &pump::gauge(power), tr.t(keys::GAUGE_TITLE));
                }
            }
            Err(_) => {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    format!("⚠ {}", tr.t(keys::WARN_INVALID_INPUT)),
                );
            }
        }
    }

    fn ui_formula_window(&mut self, ctx: &egui::Context) {
        let tr = &self.tr;
        egui::Window::new(tr.t(keys::FORMULA_TITLE))
            .collapsible(false)
            .resizable(false)
            .open(&mut self.show_formula_modal)
            .show(ctx, |ui| {
                ui.heading(formula::FORMULA);
                ui.separator();
                for line in formula::legend(tr) {
                    ui.label(format!("• {line}"));
                }
            });
    }

    fn ui_settings_window(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings_modal;
        let mut save_clicked = false;
        egui::Window::new(self.tr.t(keys::SETTINGS_TITLE))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                let tr = &self.tr;
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([10.0, 6.0])
                    .show(ui, |ui| {
                        ui.label(tr.t(keys::SETTINGS_LANGUAGE));
                        egui::ComboBox::from_id_source("lang_choice")
                            .selected_text(lang_label(tr, &self.lang_input))
                            .show_ui(ui, |ui| {
                                for code in LANG_CHOICES {
                                    ui.selectable_value(
                                        &mut self.lang_input,
                                        code.to_string(),
                                        lang_label(tr, code),
                                    );
                                }
                            });
                        ui.end_row();
                        ui.label(tr.t(keys::SETTINGS_LANG_PACK_DIR));
                        ui.text_edit_singleline(&mut self.lang_pack_dir_input);
                        ui.end_row();
                        ui.label(tr.t(keys::SETTINGS_FONT));
                        ui.horizontal(|ui| {
                            ui.text_edit_singleline(&mut self.font_path_input);
                            if ui.button(tr.t(keys::SETTINGS_FONT_PICK)).clicked() {
                                if let Some(path) = FileDialog::new()
                                    .add_filter("font", &["ttf", "ttc", "otf"])
                                    .pick_file()
                                {
                                    self.font_path_input = path.display().to_string();
                                }
                            }
                        });
                        ui.end_row();
                        ui.label(tr.t(keys::SETTINGS_SHOW_GAUGE));
                        ui.checkbox(&mut self.show_gauge, "");
                        ui.end_row();
                    });
                if ui.button(tr.t(keys::SETTINGS_SAVE)).clicked() {
                    save_clicked = true;
                }
                if let Some(status) = &self.settings_status {
                    ui.label(status);
                }
            });
        self.show_settings_modal = open;
        if save_clicked {
            self.apply_settings(ctx);
        }
    }

    /// 설정 입력을 config에 반영하고 저장한다.
    fn apply_settings(&mut self, ctx: &egui::Context) {
        let non_empty = |s: &str| {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        };
        let font_changed = non_empty(&self.font_path_input) != self.config.font_path;
        self.config.language = self.lang_input.trim().to_string();
        self.config.language_pack_dir = non_empty(&self.lang_pack_dir_input);
        self.config.font_path = non_empty(&self.font_path_input);
        self.config.show_gauge = self.show_gauge;

        let lang_code = i18n::resolve_language(&self.config.language, None);
        self.tr =
            i18n::Translator::new_with_pack(&lang_code, self.config.language_pack_dir.as_deref());
        if font_changed {
            if let Some(path) = &self.config.font_path {
                if let Err(e) = load_custom_font(ctx, path) {
                    tracing::warn!("font load: {e}");
                }
            }
        }
        self.settings_status = Some(match self.config.save() {
            Ok(()) => {
                tracing::info!(path = %self.config.path.display(), "settings saved");
                self.tr.t(keys::SETTINGS_SAVED).to_string()
            }
            Err(err) => {
                tracing::error!(%err, "settings save failed");
                format!("{}: {err}", self.tr.t(keys::ERROR_PREFIX))
            }
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(self.tr.t(keys::FORMULA_TITLE)).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(self.tr.t(keys::SETTINGS_TITLE)).clicked() {
                    self.show_settings_modal = true;
                }
            });
        });

        if self.show_formula_modal {
            self.ui_formula_window(ctx);
        }
        if self.show_settings_modal {
            self.ui_settings_window(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading(
                            egui::RichText::new(format!("💧 {}", self.tr.t(keys::APP_TITLE)))
                                .color(ACCENT)
                                .size(26.0),
                        );
                        ui.label(self.tr.t(keys::APP_SUBTITLE));
                    });
                    ui.add_space(12.0);
                    self.ui_inputs(ui);
                    ui.add_space(12.0);
                    self.ui_result(ui);
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_starts_from_config_defaults() {
        let mut cfg = config::Config::default();
        cfg.defaults.head = 35.0;
        cfg.show_gauge = false;
        let app = GuiApp::new(cfg);
        assert_eq!(app.params.head, 35.0);
        assert_eq!(app.params.efficiency_percent, 70);
        assert!(!app.show_gauge);
    }

    #[test]
    fn out_of_range_config_defaults_are_clamped() {
        let mut cfg = config::Config::default();
        cfg.defaults.efficiency_percent = 0;
        cfg.defaults.fluid_density = 0.0;
        let app = GuiApp::new(cfg);
        assert_eq!(app.params.efficiency_percent, 1);
        assert_eq!(app.params.fluid_density, 1.0);
    }

    #[test]
    fn language_setting_maps_to_combo_choice() {
        let mut cfg = config::Config::default();
        cfg.language = "ko-KR".into();
        assert_eq!(GuiApp::new(cfg).lang_input, "ko");
        assert_eq!(lang_choice("EN"), "en");
        assert_eq!(lang_choice("fr"), "auto");
        let tr = i18n::Translator::new("en");
        assert_eq!(lang_label(&tr, "auto"), "System");
        assert_eq!(lang_label(&tr, "ko"), "한국어");
    }

    #[test]
    fn gauge_angle_spans_half_circle() {
        assert!((gauge_angle(0.0) - PI).abs() < 1e-6);
        assert!(gauge_angle(1.0).abs() < 1e-6);
        assert!((gauge_angle(2.0 / 3.0) - PI / 3.0).abs() < 1e-6);
        assert!(gauge_angle(5.0).abs() < 1e-6);
    }

    #[test]
    fn arc_points_start_left_and_end_right() {
        let c = egui::pos2(100.0, 100.0);
        let pts = arc_points(c, 50.0, 0.0, 1.0);
        assert!((pts[0].x - 50.0).abs() < 1e-3);
        assert!((pts.last().unwrap().x - 150.0).abs() < 1e-3);
        assert!(pts.iter().all(|p| p.y <= 100.0 + 1e-3));
    }
}
