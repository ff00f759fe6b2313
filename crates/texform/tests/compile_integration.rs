//! End-to-end tests of a compile attempt: collect, generate, run a fake
//! engine, extract and bind.

mod common;

use common::{FakeEngine, SHIFT, bbox_of, depth_of};
use texform::{
    Attribute, BBox, CompileError, EngineKind, GeneratedForm, Group, Latex, LatexOptions, Object,
    Page, Path, Reference, StyleSheet, Text, TitleStyle, Vector,
};

fn sheet() -> StyleSheet {
    StyleSheet::new()
        .with_text_size("normal", 10.0)
        .with_text_size("large", "\\large")
        .with_text_stretch("large", 1.25)
        .with_label_style("normal", "\0")
        .with_text_style("normal", "\0")
}

fn label(s: &str) -> Object {
    Text::label(s, Vector::new(100.0, 200.0)).into()
}

fn sample_page() -> Page {
    let mut page = Page::new();
    page.set_title("Overview");
    page.push(label("$\\alpha$"));
    page.push(Group::new(vec![
        label("B"),
        Path::stroked("black").into(),
        Group::new(vec![label("C"), label("D")]).into(),
        Reference::new("mark/disk(sx)", Vector::default()).into(),
    ]));
    page.push(Text::minipage("A longer paragraph.", Vector::new(50.0, 600.0), 200.0).with_size("large"));
    page
}

fn texts_of(page: &Page) -> Vec<&Text> {
    fn walk<'p>(object: &'p Object, out: &mut Vec<&'p Text>) {
        match object {
            Object::Text(text) => out.push(text),
            Object::Group(group) => group.objects().iter().for_each(|o| walk(o, out)),
            _ => {}
        }
    }
    let mut out = Vec::new();
    page.objects().for_each(|o| walk(o, &mut out));
    out
}

#[test]
fn pdftex_round_trip_binds_every_text() {
    let sheet = sheet();
    let mut page = sample_page();
    let mut engine = FakeEngine::new(EngineKind::Pdftex);

    let mut latex = Latex::new(&sheet, LatexOptions::new(EngineKind::Pdftex));
    assert_eq!(latex.scan_page(&mut page), 5);
    let pending = latex.compile(&mut engine, "\\usepackage{amsmath}").unwrap();
    assert_eq!(pending, 5);
    assert!(latex.pending_forms().is_empty());
    let resources = latex.take_resources();
    drop(latex);

    assert_eq!(engine.runs, 1);
    assert!(engine.last_source.contains("\\usepackage{amsmath}\n"));

    let texts = texts_of(&page);
    assert_eq!(texts.len(), 5);
    for (i, text) in texts.iter().enumerate() {
        let form = text.form();
        let form = form.as_ref().expect("text has a form");
        assert_eq!(form.id, i + 1);
        assert_eq!(form.name, format!("Fm{}", i + 1));
        assert_eq!(form.depth, depth_of(i + 1) as i32);
        let b = bbox_of(i + 1);
        assert_eq!(form.bbox, BBox::new(b[0], b[1], b[2], b[3]));
        assert_eq!(form.translation, Vector::new(-SHIFT.0 - b[0], -SHIFT.1 - b[1]));
    }
    assert_eq!(texts[4].form().as_ref().unwrap().stretch, 1.25);
    assert_eq!(texts[0].form().as_ref().unwrap().stretch, 1.0);

    // Forms plus the font they share.
    assert_eq!(resources.registry().len(), 5 + 1);
    assert!(resources.registry().find_resource("XObject", b"Fm3").is_some());
}

#[test]
fn title_is_compiled_first() {
    let sheet = sheet().with_title_style(TitleStyle {
        position: Vector::new(20.0, 770.0),
        size: Attribute::symbolic("large"),
        color: Attribute::symbolic("black"),
        horizontal_alignment: Default::default(),
        vertical_alignment: Default::default(),
    });
    let mut page = sample_page();
    let mut engine = FakeEngine::new(EngineKind::Pdftex);
    let mut latex = Latex::new(&sheet, LatexOptions::new(EngineKind::Pdftex));
    assert_eq!(latex.scan_page(&mut page), 6);
    latex.compile(&mut engine, "").unwrap();
    drop(latex);

    let title = page.title_text().unwrap();
    assert_eq!(title.form().as_ref().unwrap().id, 1);
    assert_eq!(title.form().as_ref().unwrap().stretch, 1.25);
    assert_eq!(texts_of(&page)[0].form().as_ref().unwrap().id, 2);

    let first = engine.last_source.find("Overview").unwrap();
    let second = engine.last_source.find("$\\alpha$").unwrap();
    assert!(first < second);
}

#[test]
fn rescanned_title_keeps_its_form_through_a_failed_attempt() {
    let sheet = sheet().with_title_style(TitleStyle {
        position: Vector::new(20.0, 770.0),
        size: Attribute::symbolic("large"),
        color: Attribute::symbolic("black"),
        horizontal_alignment: Default::default(),
        vertical_alignment: Default::default(),
    });
    let mut page = sample_page();
    let mut engine = FakeEngine::new(EngineKind::Pdftex);
    let mut first = Latex::new(&sheet, LatexOptions::default());
    first.scan_page(&mut page);
    first.compile(&mut engine, "").unwrap();
    drop(first);

    let mut engine = FakeEngine::new(EngineKind::Pdftex);
    engine.fail = Some("! Emergency stop.".to_string());
    let mut second = Latex::new(&sheet, LatexOptions::default());
    assert_eq!(second.scan_page(&mut page), 6);
    assert_eq!(second.create_latex_source(&mut Vec::<u8>::new(), "").unwrap(), 0);
    let err = second.compile(&mut engine, "").unwrap_err();
    assert!(matches!(err, CompileError::Engine(_)));
    drop(second);

    assert_eq!(page.title_text().unwrap().form().as_ref().unwrap().id, 1);
    assert!(texts_of(&page).iter().all(|t| t.has_form()));
}

#[test]
fn xetex_round_trip_uses_side_channel() {
    let sheet = sheet();
    let mut page = sample_page();
    let mut engine = FakeEngine::new(EngineKind::Xetex);
    let mut latex = Latex::new(&sheet, LatexOptions::new(EngineKind::Xetex));
    latex.scan_page(&mut page);
    latex.compile(&mut engine, "").unwrap();
    drop(latex);

    assert!(engine.last_source.contains("@tfform1"));
    for (i, text) in texts_of(&page).iter().enumerate() {
        let form = text.form();
        let form = form.as_ref().unwrap();
        assert_eq!(form.id, i + 1);
        assert_eq!(form.name, format!("Im{}", i + 1));
    }
}

#[test]
fn luatex_round_trip() {
    let sheet = sheet();
    let tree = Object::Group(Group::new(vec![label("x"), label("y")]));
    let mut engine = FakeEngine::new(EngineKind::Luatex);
    let mut latex = Latex::new(&sheet, LatexOptions::new(EngineKind::Luatex));
    latex.scan_object(&tree);
    latex.compile(&mut engine, "").unwrap();
    assert!(engine.last_source.contains("luatex85"));
    assert!(latex.fragments().iter().all(|f| f.text().has_form()));
}

#[test]
fn lost_form_binds_nothing() {
    let sheet = sheet();
    let mut page = sample_page();
    let mut engine = FakeEngine::new(EngineKind::Pdftex);
    engine.skip = vec![3];
    let mut latex = Latex::new(&sheet, LatexOptions::default());
    latex.scan_page(&mut page);
    let err = latex.compile(&mut engine, "").unwrap_err();
    assert_eq!(err, CompileError::Correlation { position: 3 });
    assert_eq!(latex.pending_forms().len(), 4);
    drop(latex);
    assert!(texts_of(&page).iter().all(|t| !t.has_form()));
}

#[test]
fn surplus_forms_are_dropped() {
    let sheet = sheet();
    let tree = label("only");
    let mut engine = FakeEngine::new(EngineKind::Pdftex);
    engine.extra = vec![9, 10];
    let mut latex = Latex::new(&sheet, LatexOptions::default());
    latex.scan_object(&tree);
    latex.compile(&mut engine, "").unwrap();
    assert!(latex.pending_forms().is_empty());
    assert_eq!(latex.fragments()[0].text().form().as_ref().unwrap().id, 1);
}

#[test]
fn scaled_form_fails_the_attempt() {
    let sheet = sheet();
    let tree = Object::Group(Group::new(vec![label("a"), label("b")]));
    let mut engine = FakeEngine::new(EngineKind::Pdftex);
    engine.matrix = Some([2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    let mut latex = Latex::new(&sheet, LatexOptions::default());
    latex.scan_object(&tree);
    let err = latex.compile(&mut engine, "").unwrap_err();
    assert!(matches!(err, CompileError::Geometry(_)));
    assert!(latex.pending_forms().is_empty());
    assert!(latex.fragments().iter().all(|f| !f.text().has_form()));
}

#[test]
fn xetex_output_without_link_is_resource_missing() {
    let sheet = sheet();
    let tree = label("a");
    // A pdfTeX-shaped result read by an XeTeX converter.
    let mut engine = FakeEngine::new(EngineKind::Pdftex);
    let mut latex = Latex::new(&sheet, LatexOptions::new(EngineKind::Xetex));
    latex.scan_object(&tree);
    let err = latex.compile(&mut engine, "").unwrap_err();
    assert!(matches!(err, CompileError::ResourceMissing(_)));
}

#[test]
fn engine_failure_is_reported() {
    let sheet = sheet();
    let tree = label("\\undefined");
    let mut engine = FakeEngine::new(EngineKind::Pdftex);
    engine.fail = Some("! Undefined control sequence.".to_string());
    let mut latex = Latex::new(&sheet, LatexOptions::default());
    latex.scan_object(&tree);
    let err = latex.compile(&mut engine, "").unwrap_err();
    match err {
        CompileError::Engine(msg) => assert!(msg.contains("Undefined control sequence")),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!latex.fragments()[0].text().has_form());
}

#[test]
fn recompiling_replaces_cached_forms() {
    let sheet = sheet();
    let tree = Object::Group(Group::new(vec![label("a"), label("b")]));

    let mut engine = FakeEngine::new(EngineKind::Pdftex);
    let mut first = Latex::new(&sheet, LatexOptions::default());
    first.scan_object(&tree);
    assert_eq!(first.compile(&mut engine, "").unwrap(), 2);
    drop(first);

    let mut engine = FakeEngine::new(EngineKind::Xetex);
    let mut second = Latex::new(&sheet, LatexOptions::new(EngineKind::Xetex));
    second.scan_object(&tree);
    assert_eq!(second.compile(&mut engine, "").unwrap(), 0);
    assert!(
        second
            .fragments()
            .iter()
            .all(|f| f.text().form().as_ref().unwrap().name.starts_with("Im"))
    );
}

#[test]
fn page_numbers_receive_forms() {
    let sheet = sheet();
    let mut page = sample_page();
    let mut engine = FakeEngine::new(EngineKind::Pdftex);
    let mut latex = Latex::new(&sheet, LatexOptions::default());
    latex.scan_page(&mut page);
    latex.add_page_number(0, 1, 3, 2);
    latex.compile(&mut engine, "").unwrap();
    let resources = latex.take_resources();

    assert!(engine.last_source.contains("\\def\\tfNumber#1#2{#2}"));
    let number = resources.page_number(0, 1).unwrap();
    let form: GeneratedForm = number.form().clone().unwrap();
    assert_eq!(form.id, 6);
}

#[test]
fn manual_steps_match_compile() {
    let sheet = sheet();
    let tree = Object::Group(Group::new(vec![label("p"), label("q"), label("r")]));
    let mut latex = Latex::new(&sheet, LatexOptions::default());
    latex.scan_object(&tree);

    let mut source = Vec::new();
    assert_eq!(latex.create_latex_source(&mut source, "").unwrap(), 3);
    let mut again = Vec::new();
    latex.create_latex_source(&mut again, "").unwrap();
    assert_eq!(source, again);

    let tags = common::tags(std::str::from_utf8(&source).unwrap());
    let ids: Vec<usize> = tags.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let pdf = common::native_pdf(&tags, [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    latex.read_pdf(&pdf).unwrap();
    assert_eq!(latex.pending_forms().len(), 3);
    latex.update_text_objects().unwrap();
    assert!(latex.pending_forms().is_empty());
    assert!(latex.fragments().iter().all(|f| f.text().has_form()));
}
