// Widget tree for the single converter window.
use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Alignment, Color, Element, Length};

use crate::message::{FileReport, Message};
use crate::state::App;

pub fn view(app: &App) -> Element<'_, Message> {
    let mut content = column![].spacing(10).padding(10);

    let mut import = button(text("Import Excel File(s)").size(16))
        .style(button::primary)
        .padding(8);
    if !app.converting {
        import = import.on_press(Message::PickFiles);
    }
    content = content.push(container(import).width(Length::Fill).center_x(Length::Fill));

    if let Some(status) = &app.status {
        content = content.push(text(status).size(14));
    }

    if !app.reports.is_empty() {
        let mut reports = column![].spacing(2);
        for report in &app.reports {
            reports = reports.push(view_report(report));
        }
        content = content.push(reports);
    }

    content = content.push(text("Generated Files (Desktop):").size(14));

    let list: Element<'_, Message> = if app.generated.is_empty() {
        text("(no files yet)").size(14).into()
    } else {
        let mut rows = column![].spacing(2);
        for name in &app.generated {
            rows = rows.push(view_generated_row(app, name));
        }
        scrollable(rows).height(Length::Fill).into()
    };

    content = content.push(
        container(list)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(5),
    );

    if let Some(err) = &app.error_msg {
        let banner = row![
            text(err).color(Color::WHITE).size(14).width(Length::Fill),
            button(text("x").size(14).color(Color::WHITE))
                .style(button::text)
                .padding(2)
                .on_press(Message::DismissError)
        ]
        .align_y(Alignment::Center);

        content = content.push(
            container(banner)
                .width(Length::Fill)
                .padding(5)
                .style(|_| container::Style {
                    background: Some(Color::from_rgb(0.8, 0.2, 0.2).into()),
                    ..Default::default()
                }),
        );
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_report(report: &FileReport) -> Element<'_, Message> {
    match &report.outcome {
        Ok(output) => text(format!("{} → {output}", report.source))
            .size(13)
            .color(Color::from_rgb(0.3, 0.6, 0.3))
            .into(),
        Err(err) => text(format!("Failed to convert {}: {err}", report.source))
            .size(13)
            .color(Color::from_rgb(0.8, 0.2, 0.2))
            .into(),
    }
}

fn view_generated_row<'a>(app: &'a App, name: &'a str) -> Element<'a, Message> {
    let style: fn(&iced::Theme, button::Status) -> button::Style =
        if app.selected.as_deref() == Some(name) {
            button::primary
        } else {
            button::text
        };

    button(text(name).size(14))
        .style(style)
        .padding(4)
        .width(Length::Fill)
        .on_press(Message::SelectGenerated(name.to_string()))
        .into()
}
