use super::*;

fn scores_from(values: impl Fn(usize) -> String) -> ScoreEntry {
    INDICATORS
        .into_iter()
        .enumerate()
        .map(|(i, indicator)| (indicator, values(i)))
        .collect()
}

#[test]
fn header_pairs_each_indicator_with_its_score_row_major() {
    let scores = scores_from(|i| i.to_string());
    let header = ReportHeader::build(&scores, "/static/chart.png", 1_700_000_000_000);

    assert_eq!(header.chart_src, "/static/chart.png?t=1700000000000");
    assert_eq!(header.rows[1][2].indicator, Indicator::Harmony);
    assert_eq!(header.rows[1][2].score, "6");
    assert_eq!(header.rows[2][3].indicator, Indicator::Fulfilment);
    assert_eq!(header.rows[2][3].score, "11");
}

#[test]
fn header_markup_contains_chart_heading_and_twelve_cells() {
    let scores = scores_from(|_| "20".to_string());
    let html = ReportHeader::build(&scores, "/c.png", 42).to_html();

    assert!(html.starts_with("<h2>診断結果サマリー</h2>"));
    assert!(html.contains(r#"<img src="/c.png?t=42" alt="レーダーチャート">"#));
    assert_eq!(html.matches("<tr>").count(), 3);
    assert_eq!(html.matches("<td>").count(), 12);
    assert_eq!(
        html.matches(r#"<div class="indicator-score">20</div>"#).count(),
        12
    );
    assert!(html.contains(r#"<div class="indicator-name">会話性</div>"#));
}

#[test]
fn score_text_is_escaped_in_markup() {
    let mut scores = scores_from(|_| "1".to_string());
    scores.set(Indicator::Harmony, "<b>");
    let html = ReportHeader::build(&scores, "/c.png", 0).to_html();
    assert!(html.contains("&lt;b&gt;"));
    assert!(!html.contains("<b>"));
}

#[test]
fn output_area_reads_back_as_markup() {
    assert_eq!(OutputArea::Empty.rendered_html(), "");
    assert_eq!(
        OutputArea::Narrative("<p>OK</p>".into()).rendered_html(),
        "<p>OK</p>"
    );
    assert_eq!(
        OutputArea::Text("a & <b>".into()).rendered_html(),
        "a &amp; &lt;b&gt;"
    );
}

#[test]
fn text_read_back_keeps_quotes_while_attributes_escape_them() {
    assert_eq!(
        OutputArea::Text(r#"エラーが発生しました: "busy""#.into()).rendered_html(),
        r#"エラーが発生しました: "busy""#
    );
    assert_eq!(escape_html(r#"/c.png?q="x""#), "/c.png?q=&quot;x&quot;");
}

#[test]
fn initial_view_shows_login_screen_only() {
    let view = ViewState::default();
    assert!(view.login_screen_visible);
    assert!(!view.main_screen_visible);
    assert!(view.login_button_enabled);
    assert!(view.generate_enabled && view.reset_enabled);
    assert!(!view.loading_visible && !view.admin_area_visible);
    assert!(view.header.is_none());
}

#[test]
fn score_entry_reads_missing_inputs_as_empty() {
    let mut view = ViewState::default();
    assert!(!view.set_score(Indicator::Respect, "3"));
    assert_eq!(view.score_entry().get(Indicator::Respect), "");

    view.score_inputs.push(ScoreInput::for_indicator(Indicator::Respect));
    assert!(view.set_score(Indicator::Respect, "3"));
    assert_eq!(view.score_entry().get(Indicator::Respect), "3");
}

#[test]
fn notices_are_drained_in_order() {
    let mut view = ViewState::default();
    view.notify("first");
    view.notify("second");
    assert_eq!(view.take_notices(), ["first", "second"]);
    assert!(view.notices.is_empty());
}
