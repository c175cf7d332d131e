use gpui::{
    App, AppContext, Application, Bounds, Context, Rgba, Window, WindowBounds, WindowOptions, div,
    prelude::*, px, rgb, size,
};
use gpui_highlight::{
    components::HighlightedText,
    config::{HighlightConfig, HighlightConfigExt},
};
use rand::seq::IndexedRandom;

const SAMPLE_TEXT: &str = "A highlighted span keeps one continuous rounded shape while it wraps, \
    even when consecutive lines end at different widths.\n\
    Resize the window to watch the corners follow the wrapping.";

struct HighlightDemo {
    color: Rgba,
}

impl HighlightDemo {
    fn pick_color(&mut self, cx: &mut Context<Self>) {
        if let Some(color) = cx.highlight_config().palette.choose(&mut rand::rng()) {
            self.color = *color;
        }
        cx.notify();
    }
}

impl Render for HighlightDemo {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let config = cx.highlight_config();
        let span_style = config.span_style(self.color).ok();

        div()
            .size_full()
            .bg(rgb(0xffffff))
            .flex()
            .flex_col()
            .gap_4()
            .p(px(40.))
            .child(
                div()
                    .id("draw-span")
                    .px_3()
                    .py_1()
                    .rounded_md()
                    .bg(rgb(0x313244))
                    .text_color(rgb(0xcdd6f4))
                    .cursor_pointer()
                    .child("Draw span")
                    .on_click(cx.listener(|view, _event, _window, cx| view.pick_color(cx))),
            )
            .child(div().max_w(px(360.)).child(
                HighlightedText::new("demo-highlight", SAMPLE_TEXT).map(|this| match span_style {
                    Some(style) => this.style(style),
                    None => this,
                }),
            ))
    }
}

fn main() -> anyhow::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => HighlightConfig::from_file(path)?,
        None => HighlightConfig::builtin().clone(),
    };

    Application::new().run(move |cx: &mut App| {
        gpui_highlight::init(cx);
        cx.set_highlight_config(&config);

        let color = config.span.color;
        let bounds = Bounds::centered(None, size(px(520.), px(360.)), cx);

        cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                ..Default::default()
            },
            |_window, cx| cx.new(|_cx| HighlightDemo { color }),
        )
        .unwrap();

        cx.activate(true);
    });

    Ok(())
}
