use anyhow::Result;
use ember_engine::core::{exit_code, Application, FrameCtx, HostConfig, SampleHost};
use ember_engine::logging::{init_logging, LoggingConfig};
use ember_engine::window::{Event, Key};

/// Seconds between frame-rate reports.
const REPORT_INTERVAL: f64 = 2.0;

/// Cycles the clear color and logs the frame rate.
#[derive(Default)]
struct ClearColorDemo {
    hue: f32,
    frames: u32,
    last_report: f64,
}

impl Application for ClearColorDemo {
    fn initialize(&mut self, ctx: &mut FrameCtx<'_>) -> Result<()> {
        let (w, h) = ctx.window_size();
        log::info!("demo ready: {w}x{h}, press Escape to quit");
        Ok(())
    }

    fn step(&mut self, ctx: &mut FrameCtx<'_>, dt: f32, total_time: f64) {
        while let Some(event) = ctx.pop_event() {
            match event {
                Event::Closed => ctx.exit(),
                Event::Resized { width, height } => ctx.graphics().resize(width, height),
                ev if ev.pressed_key() == Some(Key::Escape) => ctx.exit(),
                _ => {}
            }
        }

        self.hue = (self.hue + dt * 0.1).fract();
        self.frames += 1;

        let window = total_time - self.last_report;
        if window >= REPORT_INTERVAL {
            log::info!("{:.1} fps", f64::from(self.frames) / window);
            self.frames = 0;
            self.last_report = total_time;
        }
    }

    fn draw(&mut self, ctx: &mut FrameCtx<'_>) {
        let [r, g, b] = hue_to_rgb(self.hue);
        ctx.graphics().set_clear_color([r, g, b, 1.0]);
    }

    fn destroy(&mut self) {
        log::info!("demo finished");
    }
}

/// Fully saturated color at `hue` in [0, 1).
fn hue_to_rgb(hue: f32) -> [f32; 3] {
    let h = hue * 6.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    match h as u32 {
        0 => [1.0, x, 0.0],
        1 => [x, 1.0, 0.0],
        2 => [0.0, 1.0, x],
        3 => [0.0, x, 1.0],
        4 => [x, 0.0, 1.0],
        _ => [1.0, 0.0, x],
    }
}

fn main() {
    init_logging(LoggingConfig::default());

    let args: Vec<String> = std::env::args().collect();
    let config = HostConfig::from_args("ember demo", &args, 2, 0, 1280, 720);

    let mut host = SampleHost::new(config, ClearColorDemo::default());
    let result = host.run();
    drop(host);

    std::process::exit(exit_code(&result));
}
