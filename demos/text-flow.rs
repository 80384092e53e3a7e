use pdf_flow::colours;
use pdf_flow::layout::{
    Alignment, FitAxis, FontSizing, LayoutConfig, MarkerStyle, TextBox, TextSchema, TextStyle,
    VerticalAlignment,
};
use pdf_flow::{Canvas, Colour, Document, FontSet, FontSource, Mm, Pt, RenderSession};

fn main() {
    let font_path = std::env::args()
        .nth(1)
        .expect("usage: text-flow <path/to/font.ttf> [out.pdf]");
    let out_path = std::env::args()
        .nth(2)
        .unwrap_or_else(|| "text-flow.pdf".to_string());

    let fonts = FontSet::new("Body", FontSource::File(font_path.into()));
    let config = LayoutConfig::default().with_continuation_markers(MarkerStyle::default());

    let mut doc = Document::new(config.page_size);
    fonts.embed_into(&mut doc).expect("can load font");
    Canvas::add_page(&mut doc);

    let title = TextSchema::new("title", TextBox::new(Mm(20.0), Mm(15.0), Mm(170.0), Mm(20.0)))
        .with_style(TextStyle {
            font_size: FontSizing::AutoFit {
                min: Pt(10.0),
                max: Pt(36.0),
                fit: FitAxis::Horizontal,
            },
            alignment: Alignment::Center,
            vertical_alignment: VerticalAlignment::Middle,
            background_colour: Some(Colour::new_rgb_bytes(0xe8, 0xf0, 0xfe)),
            ..TextStyle::default()
        });

    let body = TextSchema::new("body", TextBox::new(Mm(20.0), Mm(45.0), Mm(170.0), Mm(200.0)))
        .with_style(TextStyle {
            font_size: FontSizing::Fixed(Pt(11.0)),
            alignment: Alignment::Justify,
            line_height: 1.4,
            font_colour: Colour::new_grey(0.2),
            ..TextStyle::default()
        });

    let footnote = TextSchema::new(
        "footnote",
        TextBox::new(Mm(20.0), Mm(260.0), Mm(170.0), Mm(15.0)),
    )
    .with_style(TextStyle {
        font_name: Some("Missing".to_string()),
        font_size: FontSizing::Fixed(Pt(8.0)),
        alignment: Alignment::Right,
        vertical_alignment: VerticalAlignment::Bottom,
        font_colour: colours::BLACK,
        opacity: 0.6,
        ..TextStyle::default()
    });

    let body_text = format!(
        "{}\n\n{}\n\n{}",
        lipsum::lipsum(120),
        lipsum::lipsum(300),
        lipsum::lipsum(500)
    );

    let session = RenderSession::new(&fonts, config);
    let report = session.render(
        &mut doc,
        0,
        &[
            (&title, "Flowing text across pages"),
            (&body, body_text.as_str()),
            (&footnote, "set in the fallback font"),
        ],
    );
    for (name, error) in report.failures.iter() {
        eprintln!("failed to render `{name}`: {error}");
    }
    println!("rendered {} fields over {} pages", report.rendered, doc.page_count());

    let mut out = std::fs::File::create(out_path).expect("can create output file");
    doc.write(&mut out).expect("can write pdf");
}
