//! Layout engine integration tests: record → paginated document → PDF.

use chrono::NaiveDate;
use clearcue::layout::document::{FontWeight, TextColor};
use clearcue::layout::{
    footer_text, render_on, DISCLAIMER_HEADING, FOOTER_Y_MM, PAGE_BREAK_Y_MM,
};
use clearcue::pipeline::fallback::fallback_record;
use clearcue::{
    generate_report_on, ClearCueError, DiagnosisForm, DiagnosisRecord, FormData, Mode, Record,
    RenderRequest, SkincareForm, SkincarePlanRecord,
};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

fn long_items(prefix: &str, n: usize) -> Vec<String> {
    (1..=n)
        .map(|i| {
            format!(
                "{prefix} item {i}: apply a thin layer to clean, dry skin and wait a few minutes \
                 before the next step, then follow with moisturizer and reassess after two weeks \
                 of consistent daily use"
            )
        })
        .collect()
}

fn long_diagnosis() -> RenderRequest {
    RenderRequest {
        mode: Mode::Diagnosis,
        record: Record::Diagnosis(DiagnosisRecord {
            diagnosis: "Chronic hand eczema with secondary irritation. ".repeat(12),
            cause: "Frequent washing and exposure to detergents. ".repeat(8),
            treatment: long_items("Treatment", 8),
            prevention: long_items("Prevention", 8),
            medicines: long_items("Medicine", 8),
            natural_remedies: long_items("Remedy", 8),
            products: long_items("Product", 8),
        }),
        form: FormData::Diagnosis(DiagnosisForm::default()),
    }
}

fn skincare_plan() -> RenderRequest {
    RenderRequest {
        mode: Mode::SkincarePlan,
        record: Record::SkincarePlan(SkincarePlanRecord {
            skin_analysis: "Combination skin".into(),
            morning_routine: vec!["Gel cleanser".into(), "Vitamin C".into(), "SPF 50".into()],
            evening_routine: vec!["Oil cleanse".into(), "Retinol".into()],
            product_recommendations: vec!["Niacinamide serum".into()],
            diet_tips: vec!["More leafy greens".into()],
            lifestyle_tips: vec!["Sleep 8 hours".into()],
        }),
        form: FormData::Skincare(SkincareForm {
            skin_type: "combination".into(),
            goals: vec!["tan".into(), "pores".into()],
            custom_goal: Some("even tone".into()),
        }),
    }
}

const SECTION_TITLES: [&str; 7] = [
    "DIAGNOSIS",
    "POSSIBLE CAUSE",
    "TREATMENT PLAN",
    "PREVENTION TIPS",
    "PRESCRIBED MEDICINES",
    "NATURAL REMEDIES",
    "RECOMMENDED PRODUCTS",
];

// ── Pagination ───────────────────────────────────────────────────────────────

#[test]
fn long_diagnosis_spans_pages_with_header_on_first_only() {
    let doc = render_on(&long_diagnosis(), date()).unwrap();

    assert!(doc.page_count() >= 2, "got {} pages", doc.page_count());
    assert!(doc.pages[0].find_run("ClearCue").is_some());
    for page in &doc.pages[1..] {
        assert!(page.find_run("ClearCue").is_none());
        assert!(page.find_run("Skin Diagnosis Report").is_none());
    }
    assert_eq!(doc.pages_containing(DISCLAIMER_HEADING), 1);
    assert!(doc.pages[0].contains_text(DISCLAIMER_HEADING));
}

#[test]
fn page_breaks_happen_only_before_section_titles() {
    let doc = render_on(&long_diagnosis(), date()).unwrap();

    for page in &doc.pages[1..] {
        let first = &page.runs[0];
        assert!(
            SECTION_TITLES.contains(&first.text.as_str()),
            "continuation page starts with {:?}",
            first.text
        );
        assert_eq!(first.y_mm, 20.0);
    }

    for title in SECTION_TITLES {
        assert_eq!(doc.pages_containing(title), 1, "{title}");
        let run = doc
            .runs()
            .find(|r| r.text == title)
            .expect("section title rendered");
        assert!(run.y_mm <= PAGE_BREAK_Y_MM, "{title} at {}", run.y_mm);
        assert_eq!(run.style.weight, FontWeight::Bold);
        assert_eq!(run.style.size_pt, 12.0);
    }
}

#[test]
fn short_record_fits_one_page() {
    let doc = render_on(&skincare_plan(), date()).unwrap();
    assert_eq!(doc.page_count(), 1);
}

// ── Footer ───────────────────────────────────────────────────────────────────

#[test]
fn footer_is_on_every_page_at_fixed_position() {
    for request in [long_diagnosis(), skincare_plan()] {
        let doc = render_on(&request, date()).unwrap();
        let footer = footer_text(request.mode);
        for (i, page) in doc.pages.iter().enumerate() {
            let run = page
                .find_run(footer)
                .unwrap_or_else(|| panic!("page {} lacks footer", i + 1));
            assert_eq!(run.y_mm, FOOTER_Y_MM);
            assert_eq!(run.style.size_pt, 7.0);
            assert_eq!(run.style.color, TextColor::FOOTER_GREY);
        }
    }
}

// ── List prefixes ────────────────────────────────────────────────────────────

#[test]
fn routines_are_numbered_other_lists_bulleted() {
    let doc = render_on(&skincare_plan(), date()).unwrap();
    let page = &doc.pages[0];

    for expected in ["1. Gel cleanser", "2. Vitamin C", "3. SPF 50", "1. Oil cleanse", "2. Retinol"] {
        assert!(page.find_run(expected).is_some(), "missing {expected}");
    }
    for expected in ["• Niacinamide serum", "• More leafy greens", "• Sleep 8 hours"] {
        assert!(page.find_run(expected).is_some(), "missing {expected}");
    }
    assert!(!page.contains_text("• Gel cleanser"));
}

#[test]
fn diagnosis_lists_are_bulleted() {
    let doc = render_on(
        &RenderRequest {
            mode: Mode::Diagnosis,
            record: fallback_record(Mode::Diagnosis),
            form: FormData::empty(Mode::Diagnosis),
        },
        date(),
    )
    .unwrap();
    assert!(doc.pages[0].contains_text("• Keep the affected area clean and dry"));
    assert!(!doc.runs().any(|r| r.text.starts_with("1. ")));
}

// ── Preamble ─────────────────────────────────────────────────────────────────

#[test]
fn skincare_metadata_lists_skin_type_and_goal_tags() {
    let doc = render_on(&skincare_plan(), date()).unwrap();
    let page = &doc.pages[0];
    assert_eq!(page.find_run("Skin Type: combination").unwrap().y_mm, 55.0);
    assert_eq!(page.find_run("Goals: tan, pores").unwrap().y_mm, 61.0);
    assert!(page.find_run("Personalized Skincare Plan").is_some());
    assert!(page.find_run("Generated on: 6/2/2025").is_some());
    assert!(!page.contains_text(DISCLAIMER_HEADING));
}

#[test]
fn brand_mark_is_indigo() {
    let doc = render_on(&skincare_plan(), date()).unwrap();
    let brand = doc.pages[0].find_run("ClearCue").unwrap();
    assert_eq!(brand.style.color, TextColor::BRAND_INDIGO);
    assert_eq!(brand.style.size_pt, 20.0);
}

// ── Failures and determinism ─────────────────────────────────────────────────

#[test]
fn record_of_other_mode_is_rejected() {
    let request = RenderRequest {
        mode: Mode::Diagnosis,
        record: fallback_record(Mode::SkincarePlan),
        form: FormData::empty(Mode::Diagnosis),
    };
    let err = render_on(&request, date()).unwrap_err();
    assert!(matches!(err, ClearCueError::Render { .. }), "got {err:?}");
}

#[test]
fn layout_is_deterministic_for_a_given_date() {
    let a = render_on(&long_diagnosis(), date()).unwrap();
    let b = render_on(&long_diagnosis(), date()).unwrap();
    assert_eq!(a, b);
}

// ── PDF report ───────────────────────────────────────────────────────────────

#[test]
fn report_is_pdf_with_mode_filename() {
    let report = generate_report_on(&long_diagnosis(), date()).unwrap();
    assert!(report.bytes.starts_with(b"%PDF-"));
    assert_eq!(report.filename, "clearcue-diagnosis-report.pdf");
    assert_eq!(report.content_type, "application/pdf");
    assert!(report.page_count >= 2);

    let report = generate_report_on(&skincare_plan(), date()).unwrap();
    assert_eq!(report.filename, "clearcue-skincare-plan.pdf");
    assert_eq!(report.page_count, 1);
}
