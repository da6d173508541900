use chrono::{DateTime, TimeZone, Utc};
use marksnip::template::{TemplateContext, fill, fill_at};
use marksnip::{Article, ConversionOptions};
use proptest::prelude::*;
use scraper::Html;

fn sample_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 14, 5, 9)
        .single()
        .expect("valid date")
}

fn context() -> TemplateContext {
    TemplateContext::new()
        .with_field("title", "My Great Post")
        .with_field("author", "Ada Lovelace")
        .with_keywords(["rust", "html", "markdown"])
}

#[test]
fn substitutes_fields_and_cases() {
    let output = fill_at(
        "{title} / {title:kebab} / {title:snake} / {title:camel} / {title:pascal}",
        &context(),
        None,
        &sample_time(),
    );
    assert_eq!(
        output,
        "My Great Post / my-great-post / my_great_post / myGreatPost / MyGreatPost"
    );
}

#[test]
fn formats_dates_from_one_instant() {
    let output = fill_at(
        "created: {date:YYYY-MM-DDTHH:mm:ss}\nday: {date:dddd}",
        &context(),
        None,
        &sample_time(),
    );
    assert_eq!(output, "created: 2024-03-01T14:05:09\nday: Friday");
}

#[test]
fn keywords_join_with_separator() {
    let now = sample_time();
    assert_eq!(fill_at("{keywords}", &context(), None, &now), "rust,html,markdown");
    assert_eq!(fill_at("{keywords: }", &context(), None, &now), "rust html markdown");
    assert_eq!(fill_at("{keywords:}", &context(), None, &now), "rusthtmlmarkdown");
    assert_eq!(
        fill_at("tags:\n  - {keywords:\\n  - }", &context(), None, &now),
        "tags:\n  - rust\n  - html\n  - markdown"
    );
}

#[test]
fn unknown_placeholders_disappear() {
    let output = fill_at("a{nope}b{title}c{x:kebab}", &context(), None, &sample_time());
    assert_eq!(output, "abMy Great Postc");
}

#[test]
fn nested_placeholders_leave_no_braces() {
    let output = fill_at("[{outer {inner} end}]", &context(), None, &sample_time());
    assert_eq!(output, "[]");
}

#[test]
fn disallowed_chars_apply_to_values_only() {
    let context = TemplateContext::new().with_field("title", "[Draft] #1: Notes?");
    let output = fill_at("# {title}", &context, Some("[]#^"), &sample_time());
    assert_eq!(output, "# Draft 1 Notes");
}

#[test]
fn template_without_braces_is_unchanged() {
    assert_eq!(fill("plain text", &context(), None), "plain text");
}

#[test]
fn article_context_exposes_url_parts() {
    let article = Article::new(
        Html::parse_fragment("<p>Body text</p>"),
        "https://example.com:8080/docs/page?x=1#top",
    )
    .with_title("Docs");
    let context = TemplateContext::from_article(&article);

    assert_eq!(context.get("title"), Some("Docs"));
    assert_eq!(context.get("host"), Some("example.com:8080"));
    assert_eq!(context.get("hostname"), Some("example.com"));
    assert_eq!(context.get("origin"), Some("https://example.com:8080"));
    assert_eq!(context.get("pathname"), Some("/docs/page"));
    assert_eq!(context.get("port"), Some("8080"));
    assert_eq!(context.get("protocol"), Some("https:"));
    assert_eq!(context.get("search"), Some("?x=1"));
    assert_eq!(context.get("hash"), Some("#top"));
    assert_eq!(context.get("length"), Some("9"));
}

#[test]
fn default_title_template_is_the_title() {
    let options = ConversionOptions::default();
    let output = fill_at(&options.title, &context(), Some(&options.disallowed_chars), &sample_time());
    assert_eq!(output, "My Great Post");
}

#[test]
fn fields_named_date_or_keywords_do_not_shadow_placeholders() {
    let context = TemplateContext::new()
        .with_field("date", "last tuesday")
        .with_field("keywords", "not these")
        .with_keywords(["a", "b"]);
    let output = fill_at("{date:YYYY}|{keywords}|{date}", &context, None, &sample_time());
    assert_eq!(output, "2024|a,b|");
}

proptest! {
    #[test]
    fn filled_output_has_no_simple_tokens(key in "[a-zA-Z]{1,12}", filler in "[a-z ]{0,10}") {
        let template = format!("{filler}{{{key}}}{filler}{{{key}:kebab}}");
        let output = fill_at(&template, &context(), None, &sample_time());
        prop_assert!(
            !output.contains(['{', '}']),
            "stray brace in {:?}",
            output
        );
    }
}
