use eframe::egui;
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::sync::mpsc::{Receiver, channel};
use std::time::{Duration, Instant};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::contact::{self, ContactForm, Field, FieldFeedback};
use crate::copyright;
use crate::reveal::{Bounds, FlyIn, ScrollReveal, TargetId, TargetKind};
use crate::site::Site;
use crate::slideshow::timer::TimerQueue;
use crate::slideshow::{Direction, Phase, SlideClass, Slideshow, SlideshowInput, Tick, Timing};
use crate::theme::Theme;

const SLIDESHOW_HEIGHT: f32 = 360.0;
const CONTENT_WIDTH: f32 = 880.0;
const FLY_IN_DURATION: f32 = 0.6;
const FLY_IN_DISTANCE: f32 = 60.0;
const NOTICE_DURATION: Duration = Duration::from_secs(8);
const FORM_RESET_DELAY: Duration = Duration::from_secs(1);

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

/// Options resolved from the CLI and user config.
pub struct PreviewOptions {
    pub windowed: bool,
    pub watch: bool,
    /// Slide to open on (1-indexed).
    pub slide: Option<usize>,
    pub theme: Option<String>,
}

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 2.5;
        let fade_start = 2.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 2.5
    }
}

/// Decoded slide images, loaded on first use.
struct ImageCache {
    textures: HashMap<PathBuf, Option<egui::TextureHandle>>,
}

impl ImageCache {
    fn new() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    fn get(&mut self, ctx: &egui::Context, path: &Path) -> Option<&egui::TextureHandle> {
        self.textures
            .entry(path.to_path_buf())
            .or_insert_with(|| match image::open(path) {
                Ok(img) => {
                    let rgba = img.into_rgba8();
                    let size = [rgba.width() as usize, rgba.height() as usize];
                    let color = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                    Some(ctx.load_texture(
                        path.display().to_string(),
                        color,
                        egui::TextureOptions::LINEAR,
                    ))
                }
                Err(e) => {
                    warn!("Could not load slide image {}: {e}", path.display());
                    None
                }
            })
            .as_ref()
    }
}

/// Everything that lives for one load of the page.
struct Page {
    site: Site,
    slideshow: Slideshow<TimerQueue<Tick>>,
    reveal: ScrollReveal<TimerQueue<FlyIn>>,
    hero_targets: Vec<TargetId>,
    keypoint_targets: Vec<TargetId>,
    recipient: String,
    form: ContactForm,
    feedback: HashMap<Field, FieldFeedback>,
    notice: Option<Instant>,
    reset_at: Option<Instant>,
    /// Phase last seen and when it began, for animating slide offsets.
    phase: Phase,
    phase_since: Instant,
    hovering: bool,
}

impl Page {
    fn mount(site: Site, config: &Config, now: Duration) -> Self {
        let mut timing = site.timing.unwrap_or_default();
        if site.timing.is_none() {
            if let Some(interval) = config.interval() {
                timing.interval = interval;
            }
        }
        let slideshow = Slideshow::mount(
            site.slides.len(),
            site.slides.len(),
            timing,
            TimerQueue::starting_at(now),
        );

        let mut reveal = ScrollReveal::new(config.reveal_strategy(), TimerQueue::starting_at(now));
        debug!(strategy = ?reveal.strategy(), "scroll reveal mounted");
        let hero_targets = site
            .hero
            .iter()
            .map(|_| reveal.observe(TargetKind::HeroText))
            .collect();
        let keypoint_targets = site
            .keypoints
            .iter()
            .map(|list| {
                reveal.observe(TargetKind::Keypoints {
                    items: list.items.len(),
                })
            })
            .collect();

        let recipient = if site.contact.recipient != contact::DEFAULT_RECIPIENT {
            site.contact.recipient.clone()
        } else {
            config
                .recipient()
                .unwrap_or(contact::DEFAULT_RECIPIENT)
                .to_string()
        };

        Self {
            site,
            slideshow,
            reveal,
            hero_targets,
            keypoint_targets,
            recipient,
            form: ContactForm::default(),
            feedback: HashMap::new(),
            notice: None,
            reset_at: None,
            phase: Phase::Idle,
            phase_since: Instant::now(),
            hovering: false,
        }
    }

    fn tick(&mut self, now: Duration) {
        self.slideshow.run_until(now);
        self.reveal.run_until(now);

        let phase = self.slideshow.phase();
        if phase != self.phase {
            self.phase = phase;
            self.phase_since = Instant::now();
        }

        if self.reset_at.is_some_and(|at| Instant::now() >= at) {
            self.form.reset();
            self.reset_at = None;
        }
        if self
            .notice
            .is_some_and(|shown| shown.elapsed() >= NOTICE_DURATION)
        {
            self.notice = None;
        }
    }

    fn next_deadline(&self) -> Option<Duration> {
        [
            self.slideshow.scheduler().next_deadline(),
            self.reveal_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    fn reveal_deadline(&self) -> Option<Duration> {
        self.reveal.scheduler().next_deadline()
    }

    /// Horizontal offset of slide `index`, as a fraction of the slideshow width.
    fn slide_offset(&self, index: usize, class: SlideClass, timing: Timing) -> f32 {
        let progress = match self.phase {
            Phase::Active { .. } => {
                let t = self.phase_since.elapsed().as_secs_f32()
                    / timing.transition.as_secs_f32().max(f32::EPSILON);
                ease_in_out(t.clamp(0.0, 1.0))
            }
            _ => 1.0,
        };
        match class {
            SlideClass::Entering(direction) => entry_side(direction),
            SlideClass::Active => match self.phase {
                Phase::Active { to, direction, .. } if to == index => {
                    entry_side(direction) * (1.0 - progress)
                }
                _ => 0.0,
            },
            SlideClass::Exiting => -progress,
            SlideClass::None => 0.0,
        }
    }

    fn submit(&mut self, ctx: &egui::Context) -> Option<String> {
        for fb in self.feedback.values_mut() {
            fb.on_input();
        }
        match self.form.validate() {
            Ok(submission) => {
                let url = submission.mailto(&self.recipient);
                info!("Opening mail client for {}", self.recipient);
                ctx.open_url(egui::OpenUrl::same_tab(url));
                self.notice = Some(Instant::now());
                self.reset_at = Some(Instant::now() + FORM_RESET_DELAY);
                None
            }
            Err(errors) => {
                for (field, error) in errors {
                    self.feedback.entry(field).or_default().show_error(error);
                }
                Some(contact::SUBMIT_FAILED.to_string())
            }
        }
    }
}

struct PreviewApp {
    site_path: PathBuf,
    config: Config,
    theme: Theme,
    clock: Instant,
    page: Page,
    images: ImageCache,
    year: i32,
    year_check_at: Instant,
    toast: Option<Toast>,
    reload_rx: Option<Receiver<DebounceEventResult>>,
    _watcher: Option<Debouncer<RecommendedWatcher>>,
}

impl PreviewApp {
    fn new(
        site_path: PathBuf,
        site: Site,
        config: Config,
        theme: Theme,
        options: &PreviewOptions,
    ) -> Self {
        let clock = Instant::now();
        let mut page = Page::mount(site, &config, Duration::ZERO);
        if let Some(slide) = options.slide {
            page.slideshow.jump_to(slide as isize);
        }
        let watch = options.watch;

        let (watcher, reload_rx) = if watch {
            match start_watcher(&site_path) {
                Ok((w, rx)) => (Some(w), Some(rx)),
                Err(e) => {
                    warn!("File watching disabled: {e}");
                    (None, None)
                }
            }
        } else {
            (None, None)
        };

        Self {
            site_path,
            config,
            theme,
            clock,
            page,
            images: ImageCache::new(),
            year: copyright::current_year(),
            year_check_at: Instant::now() + copyright::until_next_year(&chrono::Local::now()),
            toast: None,
            reload_rx,
            _watcher: watcher,
        }
    }

    fn now(&self) -> Duration {
        self.clock.elapsed()
    }

    fn poll_reload(&mut self) {
        let Some(rx) = &self.reload_rx else {
            return;
        };
        let mut changed = false;
        while let Ok(result) = rx.try_recv() {
            match result {
                Ok(events) => changed |= !events.is_empty(),
                Err(e) => warn!("Watch error: {e}"),
            }
        }
        if !changed {
            return;
        }
        match Site::load(&self.site_path) {
            Ok(site) => {
                info!("Reloaded {}", self.site_path.display());
                self.page = Page::mount(site, &self.config, self.now());
                self.images = ImageCache::new();
                self.toast = Some(Toast::new("Reloaded"));
            }
            Err(e) => {
                warn!("Reload failed: {e:#}");
                self.toast = Some(Toast::new(format!("Reload failed: {e}")));
            }
        }
    }

    fn check_year(&mut self) {
        if Instant::now() < self.year_check_at {
            return;
        }
        self.year = copyright::current_year();
        self.year_check_at = Instant::now() + copyright::until_next_year(&chrono::Local::now());
        debug!("Copyright year updated to: {}", self.year);
    }

    fn draw_hero(&mut self, ui: &mut egui::Ui, viewport: egui::Rect) {
        let width = ui.available_width();
        for (i, line) in self.page.site.hero.iter().enumerate() {
            let id = self.page.hero_targets[i];
            let galley = ui.painter().layout(
                line.clone(),
                egui::FontId::proportional(self.theme.hero_size),
                self.theme.heading_color,
                width,
            );
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(width, galley.rect.height() + 12.0),
                egui::Sense::hover(),
            );
            self.page.reveal.update(id, bounds_in(rect, viewport), viewport.height());

            let t = ui.ctx().animate_bool_with_time(
                egui::Id::new(("hero", i)),
                self.page.reveal.is_flown(id, 0),
                FLY_IN_DURATION,
            );
            let color = Theme::with_opacity(self.theme.heading_color, t);
            let pos = rect.left_top() + egui::vec2(-FLY_IN_DISTANCE * (1.0 - t), 0.0);
            ui.painter().galley(pos, galley, color);
        }
    }

    fn draw_slideshow(&mut self, ui: &mut egui::Ui) {
        if self.page.slideshow.is_empty() {
            return;
        }
        let width = ui.available_width();
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(width, SLIDESHOW_HEIGHT), egui::Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 8.0, self.theme.surface);

        let hovered = response.hovered();
        if hovered != self.page.hovering {
            self.page.hovering = hovered;
            self.page.slideshow.handle(if hovered {
                SlideshowInput::PointerEnter
            } else {
                SlideshowInput::PointerLeave
            });
        }

        let timing = self.page.slideshow.timing();
        let states: Vec<_> = self.page.slideshow.slides().to_vec();
        for (i, state) in states.iter().enumerate() {
            if !state.is_visible() {
                continue;
            }
            let offset = self.page.slide_offset(i, state.class, timing) * rect.width();
            let slide_rect = rect.translate(egui::vec2(offset, 0.0));
            self.draw_slide(ui.ctx(), &painter, i, slide_rect);
        }

        // Prev / next controls
        for (label, offset, x) in [
            ("\u{2039}", -1, rect.left() + 28.0),
            ("\u{203a}", 1, rect.right() - 28.0),
        ] {
            let center = egui::pos2(x, rect.center().y);
            let hit = egui::Rect::from_center_size(center, egui::vec2(40.0, 64.0));
            let resp = ui.interact(
                hit,
                ui.id().with(("slide-nav", offset)),
                egui::Sense::click(),
            );
            let color = if resp.hovered() {
                self.theme.accent
            } else {
                Theme::with_opacity(self.theme.foreground, 0.6)
            };
            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                label,
                egui::FontId::proportional(48.0),
                color,
            );
            if resp.clicked() {
                self.page.slideshow.advance(offset);
            }
        }

        self.draw_indicators(ui);
    }

    fn draw_slide(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        index: usize,
        rect: egui::Rect,
    ) {
        let slide = &self.page.site.slides[index];
        let padding = 48.0;
        let content = rect.shrink(padding);

        if let Some(path) = self.page.site.image_path(slide) {
            if let Some(texture) = self.images.get(ctx, &path) {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(
                    texture.id(),
                    fit_rect(texture.size_vec2(), rect),
                    uv,
                    egui::Color32::WHITE,
                );
            }
        }

        let heading = painter.layout(
            slide.heading.clone(),
            egui::FontId::proportional(self.theme.heading_size),
            self.theme.heading_color,
            content.width(),
        );
        let heading_height = heading.rect.height();
        painter.galley(content.left_top(), heading, self.theme.heading_color);

        if !slide.body.is_empty() {
            let body = painter.layout(
                slide.body.clone(),
                egui::FontId::proportional(self.theme.body_size),
                self.theme.foreground,
                content.width(),
            );
            let pos = content.left_top() + egui::vec2(0.0, heading_height + 16.0);
            painter.galley(pos, body, self.theme.foreground);
        }
    }

    fn draw_indicators(&mut self, ui: &mut egui::Ui) {
        let count = self.page.slideshow.indicators().len();
        let spacing = 20.0;
        let (row, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), 32.0),
            egui::Sense::hover(),
        );
        let start_x = row.center().x - spacing * (count as f32 - 1.0) / 2.0;
        for i in 0..count {
            let center = egui::pos2(start_x + spacing * i as f32, row.center().y);
            let hit = egui::Rect::from_center_size(center, egui::vec2(spacing, spacing));
            let resp = ui.interact(hit, ui.id().with(("indicator", i)), egui::Sense::click());
            let active = self.page.slideshow.indicators()[i];
            let color = if active || resp.hovered() {
                self.theme.accent
            } else {
                self.theme.indicator_idle
            };
            ui.painter().circle_filled(center, 6.0, color);
            if resp.clicked() {
                self.page
                    .slideshow
                    .handle(SlideshowInput::IndicatorActivated(i));
            }
        }
    }

    fn draw_keypoints(&mut self, ui: &mut egui::Ui, viewport: egui::Rect) {
        let width = ui.available_width();
        for (n, list) in self.page.site.keypoints.iter().enumerate() {
            let id = self.page.keypoint_targets[n];
            ui.add_space(24.0);
            if let Some(title) = &list.title {
                ui.label(
                    egui::RichText::new(title)
                        .size(self.theme.heading_size)
                        .color(self.theme.heading_color),
                );
            }

            let line_height = self.theme.body_size * 1.8;
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(width, line_height * list.items.len() as f32),
                egui::Sense::hover(),
            );
            self.page.reveal.update(id, bounds_in(rect, viewport), viewport.height());

            for (i, item) in list.items.iter().enumerate() {
                let t = ui.ctx().animate_bool_with_time(
                    egui::Id::new(("keypoint", n, i)),
                    self.page.reveal.is_flown(id, i),
                    FLY_IN_DURATION,
                );
                let color = Theme::with_opacity(self.theme.foreground, t);
                let pos = rect.left_top()
                    + egui::vec2(-FLY_IN_DISTANCE * (1.0 - t), line_height * i as f32);
                ui.painter().text(
                    pos,
                    egui::Align2::LEFT_TOP,
                    format!("\u{2022} {item}"),
                    egui::FontId::proportional(self.theme.body_size),
                    color,
                );
            }
        }
    }

    fn draw_contact(&mut self, ui: &mut egui::Ui) {
        ui.add_space(32.0);
        ui.label(
            egui::RichText::new("Contact")
                .size(self.theme.heading_size)
                .color(self.theme.heading_color),
        );

        if self.page.notice.is_some() {
            ui.label(
                egui::RichText::new(contact::SUCCESS_NOTICE)
                    .strong()
                    .color(self.theme.success),
            );
        }

        for &field in Field::all() {
            ui.add_space(8.0);
            ui.label(egui::RichText::new(field.label()).color(self.theme.foreground));

            let title = self.page.site.contact.titles.get(field).map(str::to_string);
            let value = self.page.form.value_mut(field);
            let edit = if field == Field::Message {
                egui::TextEdit::multiline(value).desired_rows(5)
            } else {
                egui::TextEdit::singleline(value)
            };
            let fb = self.page.feedback.entry(field).or_default();
            let edit = edit
                .id_salt(("contact", field.id()))
                .desired_width(f32::INFINITY);
            let edit = match &title {
                Some(t) => edit.hint_text(t.as_str()),
                None => edit,
            };
            let edit = if fb.error {
                edit.text_color(self.theme.error)
            } else {
                edit
            };
            let resp = ui.add(edit);

            if resp.gained_focus() {
                fb.on_focus();
            }
            if resp.changed() {
                fb.on_input();
            }
            if resp.lost_focus() {
                let value = self.page.form.value(field).to_string();
                let fb = self.page.feedback.entry(field).or_default();
                fb.on_blur(field, &value, title.as_deref());
            }

            if let Some(message) = self
                .page
                .feedback
                .get(&field)
                .and_then(|fb| fb.message.clone())
            {
                ui.label(
                    egui::RichText::new(message)
                        .size(self.theme.small_size)
                        .color(self.theme.error),
                );
            }
        }

        ui.add_space(12.0);
        if ui.button("Send message").clicked() {
            if let Some(alert) = self.page.submit(ui.ctx()) {
                self.toast = Some(Toast::new(alert));
            }
        }
    }

    fn draw_footer(&self, ui: &mut egui::Ui) {
        let Some(footer) = &self.page.site.footer else {
            return;
        };
        ui.add_space(48.0);
        ui.separator();
        ui.label(
            egui::RichText::new(footer_text(footer, self.year))
                .size(self.theme.small_size)
                .color(Theme::with_opacity(self.theme.foreground, 0.7)),
        );
        ui.add_space(24.0);
    }

    fn draw_toast(&mut self, ctx: &egui::Context) {
        let expired = self.toast.as_ref().is_some_and(Toast::is_expired);
        if expired {
            self.toast = None;
        }
        let Some(toast) = &self.toast else {
            return;
        };
        let opacity = toast.opacity();
        egui::Area::new(egui::Id::new("toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -32.0))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(Theme::with_opacity(self.theme.surface, 0.95 * opacity))
                    .inner_margin(12.0)
                    .corner_radius(6.0)
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(&toast.message)
                                .color(Theme::with_opacity(self.theme.foreground, opacity)),
                        );
                    });
            });
        ctx.request_repaint();
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_reload();
        self.check_year();
        let now = self.now();
        self.page.tick(now);

        // Arrow keys belong to text fields while one has focus.
        if !ctx.wants_keyboard_input() {
            let (left, right, theme, quit) = ctx.input(|i| {
                (
                    i.key_pressed(egui::Key::ArrowLeft),
                    i.key_pressed(egui::Key::ArrowRight),
                    i.key_pressed(egui::Key::T),
                    i.key_pressed(egui::Key::Q),
                )
            });
            if left {
                self.page.slideshow.handle(SlideshowInput::ArrowLeft);
            }
            if right {
                self.page.slideshow.handle(SlideshowInput::ArrowRight);
            }
            if theme {
                self.theme = self.theme.toggled();
                self.toast = Some(Toast::new(format!("Theme: {}", self.theme.name)));
            }
            if quit {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }

        let bg = self.theme.background;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let viewport = ui.clip_rect();
                        let margin = ((ui.available_width() - CONTENT_WIDTH) / 2.0).max(24.0);
                        ui.horizontal(|ui| {
                            ui.add_space(margin);
                            ui.vertical(|ui| {
                                ui.set_max_width(CONTENT_WIDTH.min(ui.available_width() - 24.0));
                                ui.add_space(40.0);
                                if let Some(title) = &self.page.site.title {
                                    ui.label(
                                        egui::RichText::new(title)
                                            .size(self.theme.small_size * 1.4)
                                            .color(self.theme.accent),
                                    );
                                }
                                self.draw_hero(ui, viewport);
                                ui.add_space(24.0);
                                self.draw_slideshow(ui);
                                self.draw_keypoints(ui, viewport);
                                self.draw_contact(ui);
                                self.draw_footer(ui);
                            });
                        });
                    });
            });

        self.draw_toast(ctx);

        if self.page.slideshow.is_transitioning() {
            ctx.request_repaint();
        } else if let Some(deadline) = self.page.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_sub(self.now()));
        } else {
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }
}

fn start_watcher(
    path: &Path,
) -> anyhow::Result<(Debouncer<RecommendedWatcher>, Receiver<DebounceEventResult>)> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(250), tx)?;
    debouncer
        .watcher()
        .watch(path, RecursiveMode::NonRecursive)?;
    Ok((debouncer, rx))
}

/// Side the incoming slide enters from: 1.0 right, -1.0 left.
fn entry_side(direction: Direction) -> f32 {
    match direction {
        Direction::Next => 1.0,
        Direction::Prev => -1.0,
    }
}

fn bounds_in(rect: egui::Rect, viewport: egui::Rect) -> Bounds {
    Bounds {
        top: rect.top() - viewport.top(),
        height: rect.height(),
    }
}

/// Largest rect with the texture's aspect ratio that fits in `outer`, centered.
fn fit_rect(size: egui::Vec2, outer: egui::Rect) -> egui::Rect {
    if size.x <= 0.0 || size.y <= 0.0 {
        return outer;
    }
    let scale = (outer.width() / size.x).min(outer.height() / size.y);
    egui::Rect::from_center_size(outer.center(), size * scale)
}

/// Footer fragment as display text, with its copyright year brought current.
fn footer_text(footer: &str, year: i32) -> String {
    let markup = if footer.contains("<footer") {
        footer.to_string()
    } else if footer.contains("<p") {
        format!("<footer>{footer}</footer>")
    } else {
        format!("<footer><p>{footer}</p></footer>")
    };
    plain_text(&copyright::update_markup(&markup, year).html)
}

fn plain_text(markup: &str) -> String {
    TAG.replace_all(markup, "")
        .replace("&copy;", "\u{a9}")
        .replace("&#169;", "\u{a9}")
        .replace("&amp;", "&")
        .replace("&nbsp;", " ")
}

fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn run(file: PathBuf, options: PreviewOptions) -> anyhow::Result<()> {
    let site = Site::load(&file)?;
    let config = Config::load_or_default();

    for warning in site.warnings() {
        warn!("{warning}");
    }

    let theme_name = options
        .theme
        .clone()
        .unwrap_or_else(|| config.theme().to_string());
    let theme = Theme::from_name(&theme_name);

    let title = site.title.clone().unwrap_or_else(|| {
        format!(
            "folio: {}",
            file.file_name().unwrap_or_default().to_string_lossy()
        )
    });

    let viewport = if options.windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_maximized(true)
            .with_title(&title)
    };

    let native = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        &title,
        native,
        Box::new(move |_cc| {
            Ok(Box::new(PreviewApp::new(
                file, site, config, theme, &options,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
