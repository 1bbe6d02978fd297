use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};

use contact_form::{ContactFormView, FormOptions, FormResult, SimulatedTransport, contact_form};

fn main() -> FormResult<()> {
    contact_form::telemetry::init();

    let options = FormOptions::from_env();
    let transport = SimulatedTransport::from_options(&options);
    let form = contact_form(options)?;

    Application::new().run(move |cx| {
        let bounds = Bounds::centered(None, size(px(520.0), px(640.0)), cx);
        let opened = cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                ..Default::default()
            },
            |window, cx| cx.new(|cx| ContactFormView::new(form, transport, window, cx)),
        );
        match opened {
            Ok(_) => cx.activate(true),
            Err(error) => {
                tracing::error!(%error, "failed to open contact form window");
                cx.quit();
            }
        }
    });
    Ok(())
}
