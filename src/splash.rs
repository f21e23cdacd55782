use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::{bounded, Receiver};
use egui::{
    vec2, Align, Align2, Color32, Context, Id, Key, Layout, RichText, Sense, TextureHandle,
    TextureOptions, Ui, ViewportCommand,
};

use crate::animation::LoadingText;
use crate::compositor::{self, Character};
use crate::config::SplashConfig;
use crate::fonts;
use crate::resolver::{DecodedImage, Fit, ImageCategory, ImageResolver, TargetBox};
use crate::scheduler::TimerQueue;
use crate::session::{CloseReason, Session};
use crate::theme::{
    BACKGROUND_MAX_SIDE, BAR_SIZE, CHARACTER_BOX, LOADING_SIZE, PURPLE, PURPLE_DARK, STACK_SPACING, SUBTITLE, SUBTITLE_SIZE,
    TITLE, TITLE_SIZE, YELLOW,
};

/// Work done before the event loop starts: image lookups and driver registration.
pub struct Prepared {
    background: Option<DecodedImage>,
    character:  Option<DecodedImage>,
    timers:     TimerQueue<Session>,
    session:    Session,
}

impl Prepared {
    pub fn new(config: &SplashConfig) -> Result<Self> {
        let resolver = ImageResolver::on_disk();
        let background = resolver.resolve(
            ImageCategory::Background,
            &config.background_candidates,
            TargetBox::new(BACKGROUND_MAX_SIDE, BACKGROUND_MAX_SIDE, Fit::Native),
        );
        let character = resolver.resolve(
            ImageCategory::Character,
            &config.character_candidates,
            TargetBox::new(CHARACTER_BOX[0], CHARACTER_BOX[1], Fit::Contain),
        );

        let mut timers = TimerQueue::new();
        Session::install_drivers(&mut timers)?;
        Ok(Self { background, character, timers, session: Session::new() })
    }
}

pub struct SplashWindow {
    bg_texture:   Option<TextureHandle>,
    char_texture: Option<TextureHandle>,
    timers:       TimerQueue<Session>,
    session:      Session,
    started:      Instant,
    interrupt_rx: Receiver<()>,
}

impl SplashWindow {
    pub fn new(cc: &eframe::CreationContext, prepared: Prepared) -> Self {
        fonts::install_glyph_fonts(&cc.egui_ctx);

        let mut style = (*cc.egui_ctx.style()).clone();
        style.visuals.panel_fill  = Color32::TRANSPARENT;
        style.visuals.window_fill = Color32::TRANSPARENT;
        cc.egui_ctx.set_style(style);

        let Prepared { background, character, timers, session } = prepared;
        let bg_texture = background
            .map(|img| cc.egui_ctx.load_texture("splash-background", img.image, TextureOptions::LINEAR));
        let char_texture = character
            .map(|img| cc.egui_ctx.load_texture("splash-character", img.image, TextureOptions::LINEAR));

        Self {
            bg_texture,
            char_texture,
            timers,
            session,
            started: Instant::now(),
            interrupt_rx: Self::install_interrupt_handler(&cc.egui_ctx),
        }
    }

    /// SIGINT wakes the UI thread, which then closes like any other source.
    fn install_interrupt_handler(ctx: &Context) -> Receiver<()> {
        let (tx, rx) = bounded(1);
        let ctx = ctx.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            let _ = tx.try_send(());
            ctx.request_repaint();
        }) {
            log::warn!("could not install interrupt handler: {e}");
        }
        rx
    }

    fn character(&self) -> Character {
        match &self.char_texture {
            Some(tex) => Character::Framed { texture: tex.id(), size: tex.size_vec2() },
            None => Character::Ascii,
        }
    }

    fn collect_close_requests(&mut self, ctx: &Context) {
        if self.interrupt_rx.try_recv().is_ok() {
            self.session.request_close(CloseReason::Interrupted);
        }
        if ctx.input(|i| i.viewport().close_requested()) {
            self.session.request_close(CloseReason::Destroyed);
        }
        if ctx.input(|i| i.key_pressed(Key::Escape)) {
            self.session.request_close(CloseReason::Dismissed);
        }
    }

    fn draw_content(&self, ui: &mut Ui) {
        ui.spacing_mut().item_spacing.y = STACK_SPACING;

        ui.label(RichText::new(TITLE).color(PURPLE).size(TITLE_SIZE).strong());
        compositor::draw_character(ui, self.character());
        ui.label(RichText::new(SUBTITLE).color(YELLOW).size(SUBTITLE_SIZE).italics());
        ui.label(loading_label(self.session.animation.loading_text()));

        let (bar, _) = ui.allocate_exact_size(vec2(BAR_SIZE[0], BAR_SIZE[1]), Sense::hover());
        ui.painter().extend(compositor::progress_bar(bar, self.session.animation.state().progress));
    }
}

fn loading_label(text: LoadingText) -> RichText {
    let rich = RichText::new(text.text()).size(LOADING_SIZE);
    match text {
        LoadingText::Loading { .. } => rich.color(PURPLE_DARK),
        LoadingText::Welcome => rich.color(YELLOW).strong(),
    }
}

impl eframe::App for SplashWindow {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let now = self.started.elapsed();
        self.timers.advance_to(now, &mut self.session);
        self.collect_close_requests(ctx);
        if self.session.take_close_request().is_some() {
            log::debug!("{} timers still pending at close", self.timers.pending());
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::TRANSPARENT))
            .show(ctx, |ui| {
                let full_rect = ui.max_rect();
                ui.painter().extend(compositor::background(full_rect, self.bg_texture.as_ref().map(|t| t.id())));
            });

        egui::Area::new(Id::new("splash-content"))
            .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
            .movable(false)
            .interactable(false)
            .show(ctx, |ui| {
                ui.with_layout(Layout::top_down(Align::Center), |ui| self.draw_content(ui));
            });

        if self.session.closed_by().is_some() {
            return;
        }
        if let Some(next) = self.timers.next_deadline() {
            let wait = next.saturating_sub(self.timers.elapsed());
            ctx.request_repaint_after(wait.max(Duration::from_millis(1)));
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }
}
