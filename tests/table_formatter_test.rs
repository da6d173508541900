use marksnip::markdown_converter::render_table;
use marksnip::{
    ConversionOptions, LinkStyle, RenderOptions, TableFormatting, format_table, render_html,
};
use proptest::prelude::*;
use scraper::{Html, Selector};
use url::Url;

fn options_with(formatting: TableFormatting) -> RenderOptions {
    let conversion = ConversionOptions {
        table_formatting: formatting,
        ..ConversionOptions::default()
    };
    RenderOptions::new(conversion, Url::parse("https://example.com/").expect("valid base"))
}

fn md_with(html: &str, formatting: TableFormatting) -> String {
    render_html(&Html::parse_fragment(html), &options_with(formatting)).markdown
}

fn md(html: &str) -> String {
    md_with(html, TableFormatting::default())
}

const TWO_BY_TWO: &str = "<table><thead><tr><th>A</th><th>B</th></tr></thead>\
                          <tbody><tr><td>1</td><td>2</td></tr></tbody></table>";

#[test]
fn two_by_two_plain() {
    assert_eq!(md(TWO_BY_TWO), "| A | B |\n| --- | --- |\n| 1 | 2 |");
}

#[test]
fn centered_separator() {
    let formatting = TableFormatting {
        center_text: true,
        ..TableFormatting::default()
    };
    assert_eq!(
        md_with(TWO_BY_TWO, formatting),
        "| A | B |\n| :---: | :---: |\n| 1 | 2 |"
    );
}

#[test]
fn pretty_print_aligns_pipes() {
    let formatting = TableFormatting {
        pretty_print: true,
        ..TableFormatting::default()
    };
    assert_eq!(
        md_with(
            "<table><tr><th>Name</th><th>N</th></tr><tr><td>x</td><td>100</td></tr></table>",
            formatting
        ),
        "| Name | N   |\n| ---- | --- |\n| x    | 100 |"
    );
}

#[test]
fn separator_follows_first_row_without_header_cells() {
    assert_eq!(
        md("<table><tr><td>a</td></tr><tr><td>b</td></tr></table>"),
        "| a |\n| --- |\n| b |"
    );
}

#[test]
fn short_rows_keep_their_cells() {
    assert_eq!(
        md("<table><tr><td>A</td><td>B</td><td>C</td></tr><tr><td>1</td></tr></table>"),
        "| A | B | C |\n| --- | --- | --- |\n| 1 |"
    );
}

#[test]
fn empty_rows_are_skipped() {
    assert_eq!(md("<table><tr></tr><tr><td>a</td></tr></table>"), "| a |\n| --- |");
}

#[test]
fn caption_goes_above_table() {
    assert_eq!(
        md("<table><caption>Sales\n  data</caption><tr><td>A</td></tr></table>"),
        "Sales data\n\n| A |\n| --- |"
    );
}

#[test]
fn cells_stay_on_one_line() {
    assert_eq!(
        md("<table><tr><td>a<br>b</td><td><p>one</p><p>two</p></td></tr></table>"),
        "| a<br>b | one<br><br>two |\n| --- | --- |"
    );
}

#[test]
fn pipes_in_cells_are_escaped() {
    assert_eq!(md("<table><tr><td>a|b</td></tr></table>"), "| a\\|b |\n| --- |");
}

#[test]
fn cell_text_is_escaped_like_body_text() {
    assert_eq!(
        md("<p>*a* [b](c)</p><table><tr><td>*a* [b](c)</td></tr></table>"),
        "\\*a\\* \\[b\\](c)\n\n| \\*a\\* \\[b\\](c) |\n| --- |"
    );
}

#[test]
fn stripped_cells_render_images_as_alt_text() {
    let formatting = TableFormatting {
        strip_links: true,
        ..TableFormatting::default()
    };
    let markdown = md_with(
        "<table><tr><td><a href=\"/x\">x</a></td>\
         <td><img src=\"https://example.com/icon.png\" alt=\"Icon\"></td></tr></table>",
        formatting,
    );
    assert_eq!(markdown, "| x | Icon |\n| --- | --- |");
}

#[test]
fn nested_table_stays_inside_its_cell() {
    assert_eq!(
        md("<table><tr><td><table><tr><td>x</td></tr></table></td></tr></table>"),
        "| \\| x \\|<br>\\| --- \\| |\n| --- |"
    );
}

#[test]
fn links_and_formatting_kept_by_default() {
    assert_eq!(
        md("<table><tr><td><a href=\"https://a.com\">x</a> <strong>b</strong></td></tr></table>"),
        "| [x](https://a.com) **b** |\n| --- |"
    );
}

#[test]
fn strip_formatting_drops_delimiters() {
    let formatting = TableFormatting {
        strip_formatting: true,
        ..TableFormatting::default()
    };
    assert_eq!(
        md_with(
            "<table><tr><td><strong>b</strong> <em>i</em></td></tr></table><p><em>kept</em></p>",
            formatting
        ),
        "| b i |\n| --- |\n\n_kept_"
    );
}

#[test]
fn stripped_cell_links_leave_no_references() {
    let conversion = ConversionOptions {
        link_style: LinkStyle::Referenced,
        table_formatting: TableFormatting {
            strip_links: true,
            ..TableFormatting::default()
        },
        ..ConversionOptions::default()
    };
    let options = RenderOptions::new(conversion, Url::parse("https://example.com/").expect("valid base"));
    let html = Html::parse_fragment(
        "<table><tr><td><a href=\"https://a.com\">x</a></td></tr></table>\
         <p><a href=\"https://b.com\">y</a></p>",
    );
    assert_eq!(
        render_html(&html, &options).markdown,
        "| x |\n| --- |\n\n[y][1]\n\n[1]: https://b.com"
    );
}

#[test]
fn render_table_on_a_single_element() {
    let html = Html::parse_fragment("<div><table><tr><th>A</th></tr></table></div>");
    let selector = Selector::parse("table").expect("valid selector");
    let table = html.select(&selector).next().expect("table present");
    assert_eq!(
        render_table(table, &options_with(TableFormatting::default())),
        "| A |\n| --- |"
    );
}

#[test]
fn all_toggles_compose() {
    let formatting = TableFormatting {
        strip_links: true,
        strip_formatting: true,
        pretty_print: true,
        center_text: true,
    };
    assert_eq!(
        md_with(
            "<table><tr><th><b>Key</b></th></tr><tr><td><a href=\"/x\">value</a></td></tr></table>",
            formatting
        ),
        "|  Key  |\n| :---: |\n| value |"
    );
}

#[test]
fn format_table_directly() {
    let rows = vec![
        vec!["h1".to_string(), "h2".to_string()],
        vec!["a".to_string(), "b".to_string()],
    ];
    assert_eq!(
        format_table(&rows, &TableFormatting::default()),
        "| h1 | h2 |\n| --- | --- |\n| a | b |"
    );
    assert_eq!(format_table(&[], &TableFormatting::default()), "");
}

proptest! {
    #[test]
    fn strip_links_never_leaves_link_syntax(
        texts in prop::collection::vec("[a-z]{1,8}", 1..5),
        with_images in prop::collection::vec(any::<bool>(), 5),
    ) {
        let cells: String = texts
            .iter()
            .zip(&with_images)
            .map(|(text, &image)| {
                if image {
                    format!("<td><img src=\"https://example.com/{text}.png\" alt=\"{text}\"></td>")
                } else {
                    format!("<td><a href=\"https://example.com/{text}\">{text}</a></td>")
                }
            })
            .collect();
        let html = format!("<table><tr>{cells}</tr></table>");
        let formatting = TableFormatting { strip_links: true, ..TableFormatting::default() };

        let markdown = md_with(&html, formatting);
        prop_assert!(!markdown.contains("]("));
        for text in &texts {
            prop_assert!(markdown.contains(text.as_str()));
        }
    }
}
