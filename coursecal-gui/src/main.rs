// Desktop frontend: pick xlsx exports, convert them, open the results.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod message;
mod state;
mod update;
mod view;

use iced::{window, Element, Size, Task};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use message::Message;
use state::App;

fn main() -> iced::Result {
    let _ = TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    iced::application(App::new, App::update, App::view)
        .title(App::title)
        .window(window::Settings {
            size: Size::new(540.0, 520.0),
            ..Default::default()
        })
        .run()
}

impl App {
    fn update(&mut self, message: Message) -> Task<Message> {
        update::update(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }

    fn title(&self) -> String {
        String::from("Excel → ICS Converter")
    }
}
