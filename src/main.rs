mod window;

use folio_fx::error::ViewerError;
use folio_fx::showcase::Showcase;
use winit::event_loop::{ControlFlow, EventLoop};

fn run() -> Result<(), ViewerError> {
    folio_fx::init();

    let showcase = match std::env::args().nth(1) {
        Some(name) => Showcase::from_name(&name).ok_or(ViewerError::UnknownShowcase(name))?,
        None => Showcase::default(),
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = window::App::new(showcase);
    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    if let Err(e) = run() {
        log::error!("{}", e);
        if let ViewerError::UnknownShowcase(_) = e {
            let names: Vec<String> = Showcase::ALL.iter().map(Showcase::name).collect();
            log::error!("Available: {} (or card-N)", names.join(", "));
        }
        std::process::exit(1);
    }
}
