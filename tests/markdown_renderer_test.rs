use std::collections::HashMap;

use marksnip::{
    CodeBlockStyle, ConversionOptions, HeadingStyle, ImageDownload, ImageRefStyle, ImageStyle,
    LinkReferenceStyle, LinkStyle, RenderOptions, RenderedMarkdown, render_html,
};
use scraper::Html;
use url::Url;

const BASE: &str = "https://example.com/blog/";

fn render_with(html: &str, conversion: ConversionOptions) -> RenderedMarkdown {
    let options = RenderOptions::new(conversion, Url::parse(BASE).expect("valid base"));
    render_html(&Html::parse_fragment(html), &options)
}

fn md(html: &str) -> String {
    render_with(html, ConversionOptions::default()).markdown
}

fn md_with(html: &str, conversion: ConversionOptions) -> String {
    render_with(html, conversion).markdown
}

// ============================================================================
// Blocks
// ============================================================================

#[test]
fn atx_headings() {
    assert_eq!(md("<h1>Title</h1><h3>Sub</h3>"), "# Title\n\n### Sub");
}

#[test]
fn setext_headings_for_levels_one_and_two() {
    let options = ConversionOptions {
        heading_style: HeadingStyle::Setext,
        ..ConversionOptions::default()
    };
    assert_eq!(
        md_with("<h1>Title</h1><h2>Sub</h2><h3>Deep</h3>", options),
        "Title\n=====\n\nSub\n---\n\n### Deep"
    );
}

#[test]
fn heading_is_kept_on_one_line() {
    assert_eq!(md("<h2>Split<br>heading</h2>"), "## Split heading");
}

#[test]
fn paragraphs_and_rule() {
    assert_eq!(md("<p>a</p><hr><p>b</p>"), "a\n\n---\n\nb");
}

#[test]
fn line_break_inside_paragraph() {
    assert_eq!(md("<p>a<br>b</p>"), "a  \nb");
}

#[test]
fn blockquote_marks_every_line() {
    assert_eq!(
        md("<blockquote><p>One</p><p>Two</p></blockquote>"),
        "> One\n> \n> Two"
    );
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn bullet_list_uses_configured_marker() {
    assert_eq!(md("<ul><li>One</li><li>Two</li></ul>"), "- One\n- Two");

    let options = ConversionOptions {
        bullet_list_marker: "*".to_string(),
        ..ConversionOptions::default()
    };
    assert_eq!(md_with("<ul><li>One</li></ul>", options), "* One");
}

#[test]
fn ordered_list_honours_start() {
    assert_eq!(
        md("<ol start=\"3\"><li>c</li><li>d</li></ol>"),
        "3. c\n4. d"
    );
}

#[test]
fn nested_list_is_indented() {
    assert_eq!(
        md("<ul><li>A<ul><li>B</li></ul></li><li>C</li></ul>"),
        "- A\n  - B\n- C"
    );
}

#[test]
fn task_list_items() {
    assert_eq!(
        md("<ul><li><input type=\"checkbox\" checked> Done</li><li><input type=\"checkbox\"> Todo</li></ul>"),
        "- [x] Done\n- [ ] Todo"
    );
}

// ============================================================================
// Code
// ============================================================================

#[test]
fn fenced_code_with_language() {
    assert_eq!(
        md("<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"),
        "```rust\nfn main() {}\n```"
    );
}

#[test]
fn fence_grows_past_inner_fence() {
    assert_eq!(
        md("<pre><code>a\n```\nb</code></pre>"),
        "````\na\n```\nb\n````"
    );
}

#[test]
fn tilde_fence_from_options() {
    let options = ConversionOptions {
        fence: "~~~".to_string(),
        ..ConversionOptions::default()
    };
    assert_eq!(md_with("<pre>x</pre>", options), "~~~\nx\n~~~");
}

#[test]
fn indented_code_block() {
    let options = ConversionOptions {
        code_block_style: CodeBlockStyle::Indented,
        ..ConversionOptions::default()
    };
    assert_eq!(
        md_with("<pre><code>line1\nline2</code></pre>", options),
        "    line1\n    line2"
    );
}

#[test]
fn code_text_is_not_escaped() {
    assert_eq!(
        md("<pre><code>let x = a * b_c;</code></pre>"),
        "```\nlet x = a * b_c;\n```"
    );
}

#[test]
fn inline_code_spans() {
    assert_eq!(md("<p>Use <code>x</code> now</p>"), "Use `x` now");
    assert_eq!(md("<p><code>a`b</code></p>"), "``a`b``");
}

#[test]
fn mark_renders_as_code_span() {
    assert_eq!(md("<p>a <mark>hot</mark> b</p>"), "a `hot` b");
}

// ============================================================================
// Inline formatting and escaping
// ============================================================================

#[test]
fn emphasis_delimiters_follow_options() {
    let options = ConversionOptions {
        em_delimiter: "*".to_string(),
        strong_delimiter: "__".to_string(),
        ..ConversionOptions::default()
    };
    assert_eq!(
        md_with("<p><em>soft</em> <strong>loud</strong> <del>gone</del></p>", options),
        "*soft* __loud__ ~~gone~~"
    );
}

#[test]
fn whitespace_only_emphasis_has_no_markers() {
    assert_eq!(md("<p>a<strong> </strong>b</p>"), "a b");
}

#[test]
fn escaping_can_be_disabled() {
    assert_eq!(md("<p>a*b_c</p>"), "a\\*b\\_c");

    let options = ConversionOptions {
        escape_markdown: false,
        ..ConversionOptions::default()
    };
    assert_eq!(md_with("<p>a*b_c</p>", options), "a*b_c");
}

#[test]
fn non_content_elements_are_dropped() {
    assert_eq!(
        md("<p>keep</p><style>p{}</style><noscript>js</noscript><form><button>Go</button></form>"),
        "keep"
    );
}

// ============================================================================
// Links
// ============================================================================

#[test]
fn inlined_link_is_resolved_with_title() {
    assert_eq!(
        md("<p><a href=\"/docs\" title=\"The &quot;docs&quot;\">Read</a></p>"),
        "[Read](https://example.com/docs \"The \\\"docs\\\"\")"
    );
}

#[test]
fn relative_link_appends_to_base() {
    assert_eq!(
        md("<p><a href=\"next.html\">Next</a></p>"),
        "[Next](https://example.com/blog/next.html)"
    );
}

#[test]
fn link_with_spaces_is_bracketed() {
    assert_eq!(
        md("<p><a href=\"https://a.com/a b\">x</a></p>"),
        "[x](<https://a.com/a b>)"
    );
}

#[test]
fn referenced_links_are_listed_after_body() {
    let options = ConversionOptions {
        link_style: LinkStyle::Referenced,
        ..ConversionOptions::default()
    };
    assert_eq!(
        md_with(
            "<p><a href=\"https://a.com\">A</a> and <a href=\"https://b.com\">B</a></p><p>End</p>",
            options
        ),
        "[A][1] and [B][2]\n\nEnd\n\n[1]: https://a.com\n[2]: https://b.com"
    );
}

#[test]
fn collapsed_and_shortcut_references() {
    let collapsed = ConversionOptions {
        link_style: LinkStyle::Referenced,
        link_reference_style: LinkReferenceStyle::Collapsed,
        ..ConversionOptions::default()
    };
    assert_eq!(
        md_with("<p><a href=\"https://a.com\">A</a></p>", collapsed),
        "[A][]\n\n[A]: https://a.com"
    );

    let shortcut = ConversionOptions {
        link_style: LinkStyle::Referenced,
        link_reference_style: LinkReferenceStyle::Shortcut,
        ..ConversionOptions::default()
    };
    assert_eq!(
        md_with("<p><a href=\"https://a.com\">A</a></p>", shortcut),
        "[A]\n\n[A]: https://a.com"
    );
}

#[test]
fn strip_links_keeps_text() {
    let options = ConversionOptions {
        link_style: LinkStyle::StripLinks,
        ..ConversionOptions::default()
    };
    assert_eq!(
        md_with("<p>See <a href=\"/x\">this page</a>.</p>", options),
        "See this page."
    );
}

#[test]
fn anchor_without_href_is_plain_text() {
    assert_eq!(md("<p><a name=\"top\">Top</a></p>"), "Top");
}

#[test]
fn link_wrapped_heading_renders_as_heading() {
    assert_eq!(md("<a href=\"/post\"><h2>Title</h2></a>"), "## Title");
}

// ============================================================================
// Images
// ============================================================================

#[test]
fn markdown_image_is_resolved() {
    assert_eq!(
        md("<p><img src=\"/i/a.png\" alt=\"A\" title=\"T\"></p>"),
        "![A](https://example.com/i/a.png \"T\")"
    );
}

#[test]
fn no_image_style_drops_images() {
    let options = ConversionOptions {
        image_style: ImageStyle::NoImage,
        ..ConversionOptions::default()
    };
    assert_eq!(md_with("<p>x<img src=\"a.png\">y</p>", options), "xy");
}

#[test]
fn image_without_src_renders_nothing() {
    assert_eq!(md("<p>x<img alt=\"lost\">y</p>"), "xy");
}

#[test]
fn referenced_images() {
    let options = ConversionOptions {
        image_ref_style: ImageRefStyle::Referenced,
        ..ConversionOptions::default()
    };
    assert_eq!(
        md_with("<p><img src=\"https://a.com/a.png\" alt=\"A\"></p>", options),
        "![A][fig1]\n\n[fig1]: https://a.com/a.png"
    );
}

#[test]
fn base64_uses_embedded_data_uri() {
    let conversion = ConversionOptions {
        image_style: ImageStyle::Base64,
        ..ConversionOptions::default()
    };
    let embedded = HashMap::from([(
        "https://example.com/i/a.png".to_string(),
        "data:image/png;base64,AAAA".to_string(),
    )]);
    let options = RenderOptions::new(conversion, Url::parse(BASE).expect("valid base"))
        .with_embedded_images(embedded);
    let html = Html::parse_fragment("<p><img src=\"/i/a.png\" alt=\"A\"><img src=\"/i/b.png\" alt=\"B\"></p>");

    assert_eq!(
        render_html(&html, &options).markdown,
        "![A](data:image/png;base64,AAAA)![B](https://example.com/i/b.png)"
    );
}

#[test]
fn downloaded_images_are_renamed_and_listed_once() {
    let conversion = ConversionOptions {
        download_images: true,
        ..ConversionOptions::default()
    };
    let options = RenderOptions::new(conversion, Url::parse(BASE).expect("valid base"))
        .with_image_prefix("assets/");
    let html = Html::parse_fragment(
        "<p><img src=\"https://cdn.com/x/a.png?w=2\" alt=\"A\"></p>\
         <p><img src=\"https://cdn.com/x/a.png?w=2\" alt=\"again\"></p>",
    );
    let rendered = render_html(&html, &options);

    assert_eq!(
        rendered.markdown,
        "![A](assets/a.png)\n\n![again](assets/a.png)"
    );
    assert_eq!(
        rendered.image_list,
        vec![ImageDownload {
            url: "https://cdn.com/x/a.png?w=2".to_string(),
            filename: "assets/a.png".to_string(),
        }]
    );
}

#[test]
fn obsidian_styles() {
    let obsidian = ConversionOptions {
        image_style: ImageStyle::Obsidian,
        download_images: true,
        ..ConversionOptions::default()
    };
    let options = RenderOptions::new(obsidian.clone(), Url::parse(BASE).expect("valid base"))
        .with_image_prefix("assets/");
    let html = Html::parse_fragment("<p><img src=\"https://cdn.com/a.png\"></p>");
    assert_eq!(render_html(&html, &options).markdown, "![[assets/a.png]]");

    let no_folder = ConversionOptions {
        image_style: ImageStyle::ObsidianNoFolder,
        ..obsidian
    };
    let options = RenderOptions::new(no_folder, Url::parse(BASE).expect("valid base"))
        .with_image_prefix("assets/");
    assert_eq!(render_html(&html, &options).markdown, "![[a.png]]");
}

#[test]
fn data_uri_images_are_never_downloaded() {
    let conversion = ConversionOptions {
        download_images: true,
        ..ConversionOptions::default()
    };
    let rendered = render_with("<p><img src=\"data:image/gif;base64,R0\" alt=\"\"></p>", conversion);
    assert_eq!(rendered.markdown, "![](data:image/gif;base64,R0)");
    assert!(rendered.image_list.is_empty());
}
