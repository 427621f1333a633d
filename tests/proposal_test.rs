//! 템플릿 읽기 → 파싱 → HTML/Excel 생성 통합 테스트
//!
//! rust_xlsxwriter로 만든 템플릿 픽스처를 calamine 경로로 다시 읽는다.

use checkup_proposal::{
    compute_spans, display_grid, load_price_options, parse_items, render_document,
    render_workbook, DefaultsTable, GroupDefaults, Identity, Plan, ProposalError,
};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 수기 템플릿을 흉내낸 픽스처 시트를 만든다
///
/// 5행에 금액 헤더("25만원"/"70만원"/"10만원"), 아래로 A/B/C,
/// 장비검사, 혈액·소변 블록이 이어진다.
fn write_fixture(dir: &Path) -> PathBuf {
    let rows: &[&[&str]] = &[
        &["2026 기업검진 단가표"],
        &[],
        &[],
        &[],
        &["구분", "검진항목", "내용", "25만원", "70만원", "10만원"],
        &["A그룹 (정밀)"],
        &["", "갑상선초음파", "갑상선 정밀", "선택 3", "선택 5"],
        &["", "경동맥초음파", "", "", ""],
        &["", "뇌CT", "", "선택 5", "O"],
        &["B그룹 (특화)"],
        &["", "심장초음파", "", "미선택", "선택 1"],
        &["C그룹 (VIP)"],
        &["", "뇌MRI+MRA", "", "-", "선택 1"],
        &["장비검사"],
        &["신체계측", "신장·체중 측정", "", "기본", "기본"],
        &["혈액 및 소변검사"],
        &["", "간기능검사", "AST/ALT", "O", "O"],
    ];

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if !cell.is_empty() {
                worksheet
                    .write_string(r as u32, c as u16, *cell)
                    .expect("픽스처 셀 쓰기 실패");
            }
        }
    }

    let path = dir.join("template.xlsx");
    workbook.save(&path).expect("픽스처 저장 실패");
    path
}

fn fixture_plans() -> Vec<Plan> {
    vec![
        Plan {
            name: "표준형".into(),
            col_idx: 4,
            ..Default::default()
        },
        Plan {
            name: "프리미엄".into(),
            col_idx: 5,
            ..Default::default()
        },
    ]
}

#[test]
fn test_load_price_options_discovery() {
    let dir = tempdir().expect("임시 디렉토리 생성 실패");
    let path = write_fixture(dir.path());

    let table = DefaultsTable::default();
    let (header_row, options) = load_price_options(&path, &table).expect("옵션 로드 실패");

    assert_eq!(header_row, 5);
    // "10만원"은 제외, 금액 오름차순 정렬
    let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["25만원", "70만원"]);
    assert_eq!(options[0].col_idx, 4);
    assert_eq!(options[1].col_idx, 5);
    // 수동 기본값 테이블 우선
    assert_eq!(options[0].defaults, GroupDefaults::new(3, 0, 0));
    assert_eq!(options[1].defaults, GroupDefaults::new(5, 1, 1));
}

#[test]
fn test_load_price_options_header_missing() {
    let dir = tempdir().expect("임시 디렉토리 생성 실패");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "금액 표기 없는 시트").unwrap();
    let path = dir.path().join("no_header.xlsx");
    workbook.save(&path).unwrap();

    let err = load_price_options(&path, &DefaultsTable::default()).unwrap_err();
    assert!(matches!(err, ProposalError::TemplateFormat(_)));
}

#[test]
fn test_parse_items_carry_and_buckets() {
    let dir = tempdir().expect("임시 디렉토리 생성 실패");
    let path = write_fixture(dir.path());
    let plans = fixture_plans();

    let (data, summary) = parse_items(&path, 5, &plans).expect("파싱 실패");

    // 이월: 경동맥초음파 빈 셀은 위 "선택" 값을 이어받는다
    let a_col0: Vec<&str> = data.a.iter().map(|i| i.values[0].as_str()).collect();
    assert_eq!(a_col0, vec!["선택 3", "선택 3", "선택 5"]);
    let a_col1: Vec<&str> = data.a.iter().map(|i| i.values[1].as_str()).collect();
    assert_eq!(a_col1, vec!["선택 5", "선택 5", "O"]);

    // 미선택은 빈 값으로
    assert_eq!(data.b[0].values[0], "");
    assert_eq!(data.b[0].values[1], "선택 1");

    assert_eq!(data.equip[0].category_tag, "신체계측");
    assert_eq!(data.common_blood[0].name, "간기능검사");
    assert_eq!(data.common_blood[0].description, "AST/ALT");

    // 모든 항목의 값 길이는 플랜 수와 같다
    for bucket in [&data.a, &data.b, &data.c, &data.equip, &data.common_blood] {
        for item in bucket.iter() {
            assert_eq!(item.values.len(), plans.len());
        }
    }

    // 요약은 플랜 규칙(여기서는 빈 문자열)을 그대로 반영
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].name, "표준형");
    assert_eq!(summary[0].a, "");
    assert_eq!(summary[1].c, "");
}

#[test]
fn test_parse_items_idempotent() {
    let dir = tempdir().expect("임시 디렉토리 생성 실패");
    let path = write_fixture(dir.path());
    let plans = fixture_plans();

    let first = parse_items(&path, 5, &plans).expect("1차 파싱 실패");
    let second = parse_items(&path, 5, &plans).expect("2차 파싱 실패");
    assert_eq!(first, second);
}

#[test]
fn test_parse_items_invalid_header_row() {
    let dir = tempdir().expect("임시 디렉토리 생성 실패");
    let path = write_fixture(dir.path());

    let err = parse_items(&path, 999, &fixture_plans()).unwrap_err();
    assert!(matches!(err, ProposalError::SourceRead(_)));
}

#[test]
fn test_parse_items_missing_file() {
    let err = parse_items("없는_파일.xlsx", 5, &fixture_plans()).unwrap_err();
    assert!(matches!(err, ProposalError::SourceRead(_)));
}

#[test]
fn test_group_rule_override_end_to_end() {
    let dir = tempdir().expect("임시 디렉토리 생성 실패");
    let path = write_fixture(dir.path());

    let mut plans = fixture_plans();
    plans[0].a_rule = "-".into();
    plans[1].a_rule = "선택 2".into();

    let (data, summary) = parse_items(&path, 5, &plans).expect("파싱 실패");

    for item in &data.a {
        // "-" 규칙: A그룹의 선택 값(이월 포함)을 모두 비운다
        if item.name != "뇌CT" {
            assert_eq!(item.values[0], "");
        }
    }
    // 치환 규칙: "선택" 셀 값을 그대로 교체
    assert_eq!(data.a[0].values[1], "선택 2");
    // 뇌CT의 프리미엄 컬럼은 "O"라 규칙 대상이 아니다
    assert_eq!(data.a[2].values[1], "O");

    assert_eq!(summary[0].a, "-");
    assert_eq!(summary[1].a, "선택 2");
}

#[test]
fn test_render_both_formats_end_to_end() {
    let dir = tempdir().expect("임시 디렉토리 생성 실패");
    let path = write_fixture(dir.path());
    let plans = fixture_plans();

    let (data, summary) = parse_items(&path, 5, &plans).expect("파싱 실패");
    let identity = Identity {
        company: "한빛상사".into(),
        manager_name: "김담당".into(),
        manager_phone: "02-000-0000".into(),
        manager_email: "kim@example.com".into(),
    };

    let html = render_document(&plans, &data, &summary, &identity);
    assert!(html.contains("2026 한빛상사 임직원 건강검진 제안서"));
    assert!(html.contains("표준형"));
    assert!(html.contains("프리미엄"));

    let bytes = render_workbook(&plans, &data, &summary, &identity).expect("Excel 생성 실패");
    assert!(bytes.len() > 1024);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_merge_spans_consistent_across_formats() {
    let dir = tempdir().expect("임시 디렉토리 생성 실패");
    let path = write_fixture(dir.path());
    let plans = fixture_plans();

    let (data, summary) = parse_items(&path, 5, &plans).expect("파싱 실패");

    // 두 렌더러가 공유하는 병합 엔진의 구간 경계
    let spans = compute_spans(&display_grid(&data.a));
    assert_eq!(spans.span(0, 0), 2);
    assert!(spans.is_absorbed(1, 0));
    assert_eq!(spans.runs(0), vec![(0, 2), (2, 1)]);
    assert_eq!(spans.runs(1), vec![(0, 2), (2, 1)]);

    // HTML 출력의 rowspan은 같은 구간 길이를 그대로 쓴다
    let identity = Identity::default();
    let html = render_document(&plans, &data, &summary, &identity);
    assert_eq!(html.matches("rowspan=\"2\"").count(), 2);

    // Excel 출력도 같은 엔진을 거치므로 에러 없이 병합이 반영된다
    let bytes = render_workbook(&plans, &data, &summary, &identity).expect("Excel 생성 실패");
    assert!(!bytes.is_empty());
}
