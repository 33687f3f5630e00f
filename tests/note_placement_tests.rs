use pagenotes::document::DocumentSource;
use pagenotes::notes::NotePosition;
use pagenotes::placement::Placement;
use pagenotes::run_app_with_event_source;
use pagenotes::test_utils::test_helpers::*;
use pagenotes::widget::{HudMode, ToolbarButton};

fn run(app: &mut pagenotes::App, scenario: TestScenarioBuilder) {
    let mut terminal = create_test_terminal(100, 32);
    let mut event_source = scenario.build();
    run_app_with_event_source(&mut terminal, app, &mut event_source).unwrap();
}

/// Cell at the given surface percentages after an initial draw
fn surface_point(app: &mut pagenotes::App, x_pct: f64, y_pct: f64) -> (u16, u16) {
    let mut terminal = create_test_terminal(100, 32);
    draw(&mut terminal, app);
    surface_cell(app, x_pct, y_pct)
}

#[test]
fn placing_a_note_through_the_ui() {
    let (mut app, _) = create_test_app(10);
    let (column, row) = surface_point(&mut app, 50.0, 50.0);

    let scenario = TestScenarioBuilder::new()
        .press_char('n')
        .click(column, row)
        .type_text("meeting notes")
        .press_enter();
    run(&mut app, scenario);

    let notes = app.viewer().notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].page, 1);
    assert_eq!(notes[0].text, "meeting notes");
    assert_eq!(notes[0].position, NotePosition::new(50.0, 50.0));
    assert_eq!(app.viewer().placement(), &Placement::Idle);

    let hud = app.hud().unwrap();
    assert_eq!(hud.message, "Note added to page 1");
    assert_eq!(hud.mode, HudMode::Normal);
}

#[test]
fn note_text_is_trimmed_and_keeps_newlines() {
    let (mut app, _) = create_test_app(10);
    let (column, row) = surface_point(&mut app, 20.0, 80.0);

    let scenario = TestScenarioBuilder::new()
        .press_char('n')
        .click(column, row)
        .type_text("  first")
        .press_alt_enter()
        .type_text("second  ")
        .press_enter();
    run(&mut app, scenario);

    let notes = app.viewer().notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].text, "first\nsecond");
}

#[test]
fn clicking_the_page_outside_placement_mode_does_nothing() {
    let (mut app, _) = create_test_app(10);
    let (column, row) = surface_point(&mut app, 30.0, 30.0);

    run(&mut app, TestScenarioBuilder::new().click(column, row));

    assert!(app.viewer().notes().is_empty());
    assert_eq!(app.viewer().placement(), &Placement::Idle);
}

#[test]
fn whitespace_only_note_is_discarded() {
    let (mut app, _) = create_test_app(10);
    let (column, row) = surface_point(&mut app, 50.0, 50.0);

    let scenario = TestScenarioBuilder::new()
        .press_char('n')
        .click(column, row)
        .type_text("   ")
        .press_enter();
    run(&mut app, scenario);

    assert!(app.viewer().notes().is_empty());
    assert!(!app.viewer().placement().is_active());
    assert_eq!(app.hud().unwrap().message, "Empty note discarded");
}

#[test]
fn escape_cancels_the_draft() {
    let (mut app, _) = create_test_app(10);
    let (column, row) = surface_point(&mut app, 50.0, 50.0);

    let scenario = TestScenarioBuilder::new()
        .press_char('n')
        .click(column, row)
        .type_text("never saved")
        .press_esc();
    run(&mut app, scenario);

    assert!(app.viewer().notes().is_empty());
    assert_eq!(app.viewer().placement(), &Placement::Idle);
}

#[test]
fn clicking_elsewhere_while_drafting_moves_the_draft() {
    let (mut app, _) = create_test_app(10);
    let (first_column, first_row) = surface_point(&mut app, 10.0, 10.0);
    let (second_column, second_row) = surface_point(&mut app, 90.0, 90.0);

    let scenario = TestScenarioBuilder::new()
        .press_char('n')
        .click(first_column, first_row)
        .type_text("abc")
        .click(second_column, second_row);
    run(&mut app, scenario);

    let placement = app.viewer().placement();
    assert!(placement.is_drafting());
    assert_eq!(placement.draft_text(), Some(""));
    let position = placement.draft_position().unwrap();
    assert!(position.x > 80.0 && position.y > 80.0);
}

#[test]
fn notes_stay_on_their_page() {
    let (mut app, _) = create_test_app(10);
    let (column, row) = surface_point(&mut app, 40.0, 60.0);

    let scenario = TestScenarioBuilder::new()
        .next_page(2)
        .press_char('n')
        .click(column, row)
        .type_text("third page")
        .press_enter()
        .next_page(1);
    run(&mut app, scenario);

    assert_eq!(app.viewer().current_page(), 4);
    assert_eq!(app.viewer().notes()[0].page, 3);
    assert_eq!(app.viewer().notes_on_current_page().count(), 0);
}

#[test]
fn sidebar_selection_jumps_to_the_note_page() {
    let (mut app, _) = create_test_app(10);
    let (column, row) = surface_point(&mut app, 50.0, 50.0);

    let scenario = TestScenarioBuilder::new()
        .next_page(1)
        .press_char('n')
        .click(column, row)
        .type_text("on two")
        .press_enter()
        .next_page(5)
        .press_char('n')
        .click(column, row)
        .type_text("on seven")
        .press_enter()
        .prev_page(4)
        .press_char('s')
        .press_char('j')
        .press_enter();
    run(&mut app, scenario);

    let notes = app.viewer().notes();
    assert_eq!(notes.len(), 2);
    assert_eq!((notes[0].page, notes[1].page), (2, 7));
    assert!(notes[0].id < notes[1].id);

    assert_eq!(app.viewer().current_page(), 7);
    assert!(!app.viewer().is_sidebar_open());
}

#[test]
fn page_navigation_stops_at_the_ends() {
    let (mut app, _) = create_test_app(10);

    run(&mut app, TestScenarioBuilder::new().prev_page(3));
    assert_eq!(app.viewer().current_page(), 1);

    run(&mut app, TestScenarioBuilder::new().next_page(20));
    assert_eq!(app.viewer().current_page(), 10);
}

#[test]
fn toolbar_buttons_respond_to_clicks() {
    let (mut app, _) = create_test_app(10);
    let mut terminal = create_test_terminal(100, 32);
    draw(&mut terminal, &mut app);

    let regions = app.toolbar_regions().clone();
    let next = regions.region(ToolbarButton::NextPage).unwrap();
    let previous = regions.region(ToolbarButton::PreviousPage).unwrap();
    let placement = regions.region(ToolbarButton::Placement).unwrap();
    let sidebar = regions.region(ToolbarButton::Sidebar).unwrap();

    let scenario = TestScenarioBuilder::new()
        .click(next.x, next.y)
        .click(next.x, next.y)
        .click(previous.x, previous.y)
        .click(placement.x, placement.y)
        .click(sidebar.x, sidebar.y);
    run(&mut app, scenario);

    assert_eq!(app.viewer().current_page(), 2);
    assert!(app.viewer().placement().is_active());
    assert!(app.viewer().is_sidebar_open());
}

#[test]
fn open_key_hands_the_document_to_the_opener() {
    let (mut app, opener) = create_test_app(10);

    run(&mut app, TestScenarioBuilder::new().press_char('o'));

    assert_eq!(
        *opener.opened.borrow(),
        vec![DocumentSource::parse("/public/sample.pdf")]
    );
    assert_eq!(app.hud().unwrap().message, "Opened sample.pdf");
}

/// Arms placement, stages a draft at the surface center and returns the
/// Cancel and Save button rects of the open form.
fn open_draft(app: &mut pagenotes::App) -> (ratatui::layout::Rect, ratatui::layout::Rect) {
    let (column, row) = surface_point(app, 50.0, 50.0);
    run(
        app,
        TestScenarioBuilder::new().press_char('n').click(column, row),
    );
    assert!(app.viewer().placement().is_drafting());

    let mut terminal = create_test_terminal(100, 32);
    draw(&mut terminal, app);
    app.page_geometry().form_buttons.unwrap()
}

#[test]
fn save_button_commits_the_draft() {
    let (mut app, _) = create_test_app(10);
    let (_, save) = open_draft(&mut app);

    let scenario = TestScenarioBuilder::new()
        .type_text("saved by mouse")
        .click(save.x + 1, save.y);
    run(&mut app, scenario);

    let notes = app.viewer().notes();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].text, "saved by mouse");
    assert_eq!(app.viewer().placement(), &Placement::Idle);
    assert_eq!(app.hud().unwrap().message, "Note added to page 1");
}

#[test]
fn cancel_button_discards_the_draft() {
    let (mut app, _) = create_test_app(10);
    let (cancel, _) = open_draft(&mut app);

    let scenario = TestScenarioBuilder::new()
        .type_text("thrown away")
        .click(cancel.x + 1, cancel.y);
    run(&mut app, scenario);

    assert!(app.viewer().notes().is_empty());
    assert_eq!(app.viewer().placement(), &Placement::Idle);
}

#[test]
fn clicks_inside_the_form_keep_the_draft() {
    let (mut app, _) = create_test_app(10);
    open_draft(&mut app);
    let form = app.page_geometry().form.unwrap();

    let scenario = TestScenarioBuilder::new()
        .type_text("keep")
        .click(form.x + 2, form.y + 2);
    run(&mut app, scenario);

    assert_eq!(app.viewer().placement().draft_text(), Some("keep"));
}

#[test]
fn escape_leaves_placement_mode() {
    let (mut app, _) = create_test_app(10);

    run(&mut app, TestScenarioBuilder::new().press_char('n'));
    assert!(app.viewer().placement().is_active());
    assert!(app.hud().is_some());

    run(&mut app, TestScenarioBuilder::new().press_esc());
    assert_eq!(app.viewer().placement(), &Placement::Idle);
    assert!(app.hud().is_none());
}

#[test]
fn clicking_a_sidebar_entry_jumps_to_its_page() {
    let (mut app, _) = create_test_app(10);
    let (column, row) = surface_point(&mut app, 50.0, 50.0);

    let scenario = TestScenarioBuilder::new()
        .next_page(1)
        .press_char('n')
        .click(column, row)
        .type_text("on two")
        .press_enter()
        .next_page(5)
        .press_char('n')
        .click(column, row)
        .type_text("on seven")
        .press_enter()
        .prev_page(4)
        .press_char('s')
        // Entries start below the border: rows 1-2 then 3-4
        .click(3, 3);
    run(&mut app, scenario);

    assert_eq!(app.viewer().current_page(), 7);
    assert!(!app.viewer().is_sidebar_open());
}

#[test]
fn marker_clicks_during_placement_stage_a_draft() {
    let (mut app, _) = create_test_app(10);
    let (column, row) = surface_point(&mut app, 50.0, 50.0);

    let scenario = TestScenarioBuilder::new()
        .press_char('n')
        .click(column, row)
        .type_text("first")
        .press_enter()
        .press_char('n')
        .click(column, row);
    run(&mut app, scenario);

    assert_eq!(app.open_note(), None);
    assert!(app.viewer().placement().is_drafting());
}
