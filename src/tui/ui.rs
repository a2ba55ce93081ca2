use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::{App, Screen};
use crate::tui::component::Component;
use crate::tui::components::drawer::DRAWER_WIDTH;
use crate::tui::components::{
    AlertDialog, Drawer, LandingPage, RecordForm, RecordList, TitleBar,
};
use crate::tui::{Focus, TuiState};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, body_area, footer_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [drawer_area, main_area] =
        Layout::horizontal([Length(DRAWER_WIDTH), Min(0)]).areas(body_area);

    TitleBar {
        backend_name: app.backend.name().to_string(),
        screen_title: app.screen.title(),
        status_message: app.status_message.clone(),
        spinner: app.is_loading().then_some(spinner_frame),
    }
    .render(frame, title_area);

    Drawer {
        state: &mut tui.drawer,
        active: app.screen,
        focused: tui.focus == Focus::Drawer,
    }
    .render(frame, drawer_area);

    match app.screen {
        Screen::Home => LandingPage {
            backend_name: app.backend.name().to_string(),
        }
        .render(frame, main_area),
        Screen::Records(resource) => {
            let state = app.screen_state(resource);
            let list_area = if state.show_form {
                let form_height = RecordForm::required_height(&state.form);
                let [form_area, list_area] =
                    Layout::vertical([Length(form_height), Min(0)]).areas(main_area);
                RecordForm {
                    form: &state.form,
                    singular: resource.singular(),
                    focused: tui.focus == Focus::Form,
                }
                .render(frame, form_area);
                list_area
            } else {
                main_area
            };

            RecordList {
                state: &mut tui.record_list,
                records: &state.records,
                title: resource.title(),
                is_loading: state.is_loading,
                focused: tui.focus == Focus::List,
            }
            .render(frame, list_area);
        }
    }

    draw_footer(frame, footer_area, tui.focus);

    if let Some(alert) = &app.alert {
        AlertDialog { alert }.render(frame, frame.area());
    }
}

fn draw_footer(frame: &mut Frame, area: Rect, focus: Focus) {
    let text = match focus {
        Focus::Drawer => " ↑/↓ Select  Enter Open  q Quit",
        Focus::List => " ↑/↓ Select  n Form  e Edit  d Delete  r Refresh  Esc Menu",
        Focus::Form => " Tab/↑/↓ Field  Enter Save  Esc Close  Ctrl+C Quit",
    };
    frame.render_widget(
        Span::styled(text, Style::default().fg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Record, Resource, Location, LocationKind};
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| {
                draw_ui(f, app, tui, 0);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_home() {
        let app = test_app();
        let mut tui = TuiState::new(app.screen);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Monitora (noop) | Home"));
        assert!(text.contains("Equipment Classes"));
        assert!(text.contains("Enter Open"));
    }

    #[test]
    fn test_draw_records_with_form() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(Screen::Records(Resource::Location)));
        update(
            &mut app,
            Action::RecordsLoaded {
                resource: Resource::Location,
                records: vec![Record::Location(Location {
                    id: 1,
                    address: "Av. Central, 500".to_string(),
                    kind: LocationKind::Hospital,
                })],
            },
        );
        update(&mut app, Action::ToggleForm);
        let mut tui = TuiState::new(app.screen);
        tui.focus = Focus::Form;
        let text = draw(&app, &mut tui);
        assert!(text.contains("New location"));
        assert!(text.contains("< Casa >"));
        assert!(text.contains("Hospital"));
        assert!(text.contains("Address: Av. Central, 500"));
    }

    #[test]
    fn test_draw_alert_overlay() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(Screen::Records(Resource::Client)));
        update(
            &mut app,
            Action::RequestFailed {
                resource: Resource::Client,
                operation: crate::core::action::Operation::Delete,
                message: "API error (HTTP 500): boom".to_string(),
            },
        );
        let mut tui = TuiState::new(app.screen);
        let text = draw(&app, &mut tui);
        assert!(text.contains("Could not delete the client."));
        assert!(text.contains("Press any key"));
    }
}
