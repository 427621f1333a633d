//! HTML 제안서 생성
//!
//! 브라우저에서 바로 볼 수 있는 자체완결 문서 한 장을 만든다.
//! 세로 병합은 merge 모듈의 SpanGrid를 rowspan으로 그대로 옮긴다.

use crate::content::{proposal_title, ProposalText};
use crate::merge::{compute_spans, display_grid, SpanGrid};
use crate::types::{Identity, Item, ParsedData, Plan, SummaryEntry};
use chrono::Local;

const CSS: &str = r#"
    @page { size: A4; margin: 10mm; }
    body { font-family: 'Pretendard', sans-serif; background: #fff; margin: 0; padding: 20px; color: #333; font-size: 11px; }
    .page { width: 210mm; min-height: 297mm; margin: 0 auto; background: white; padding: 15px 40px; box-sizing: border-box; }
    .hospital-brand { font-size: 26px; font-weight: 900; color: #1a253a; letter-spacing: -1px; }
    .hospital-sub { font-size: 16px; color: #555; margin-top: 5px; font-weight: bold; }
    .contact-card { background-color: #f8f9fa; border: 2px solid #2c3e50; border-radius: 8px; padding: 10px 15px; text-align: right; min-width: 200px; }
    .contact-title { font-size: 10px; color: #7f8c8d; font-weight: bold; margin-bottom: 2px; }
    .contact-name { font-size: 14px; font-weight: 800; color: #2c3e50; margin-bottom: 1px; }
    .contact-info { font-size: 11px; color: #333; font-weight: 600; line-height: 1.3; }
    header { display: flex; justify-content: space-between; align-items: flex-start; margin-bottom: 15px; }
    .header-divider { border-bottom: 2px solid #2c3e50; margin-bottom: 15px; }
    .section { margin-bottom: 25px; page-break-inside: avoid; }
    .sec-title { font-size: 15px; font-weight: 800; color: #2c3e50; margin-bottom: 8px; padding-left: 8px; border-left: 4px solid #2c3e50; }
    table { width: 100%; border-collapse: collapse; table-layout: fixed; font-size: 11px; border-top: 2px solid #2c3e50; }
    th { background: #f0f2f5; color: #2c3e50; padding: 8px; border: 1px solid #bdc3c7; font-weight: bold; }
    td { padding: 6px; border: 1px solid #bdc3c7; vertical-align: middle; word-break: keep-all; height: 24px; }
    .summary-table th { background: #34495e; color: white; border-color: #2c3e50; }
    .summary-header { background: #f8f9fa; font-weight: bold; color: #2c3e50; padding-left: 15px; text-align: left; }
    .text-center { text-align: center; }
    .text-bold { font-weight: bold; }
    .text-navy { color: #2c3e50; }
    .item-name-cell { text-align: left; padding-left: 10px; width: 28%; font-weight: 600; }
    .item-desc { color: #7f8c8d; font-size: 10px; font-weight: normal; }
    .cat-tag { color: #7f8c8d; font-size: 10px; margin-right: 3px; }
    .table-footer { font-size: 11px; color: #2c3e50; text-align: right; margin-top: 5px; font-weight: bold; }
    .guide-box { background-color: #fff; border: 2px solid #2c3e50; padding: 15px; margin-bottom: 15px; font-size: 11px; line-height: 1.6; }
    .guide-title { font-weight: 800; font-size: 14px; margin-bottom: 10px; display: block; color: #2c3e50; border-bottom: 1px solid #ddd; padding-bottom: 5px; }
    .guide-rule { margin-bottom: 6px; background-color: #ffebee; padding: 4px 8px; border-radius: 4px; border-left: 3px solid #e57373; }
    .guide-note { margin-top: 10px; color: #2c3e50; font-weight: bold; }
    .guide-example { margin-top: 12px; font-style: italic; color: #666; padding-left: 5px; }
    .program-grid { display: flex; flex-direction: column; gap: 6px; margin-bottom: 20px; border: 1px solid #ccc; padding: 6px; }
    .grid-box { border: 1px solid #95a5a6; background: white; }
    .grid-header { background: #34495e; color: white; padding: 6px 10px; font-weight: bold; font-size: 12px; text-align: center; }
    .grid-content { padding: 10px; font-size: 11px; line-height: 1.5; white-space: pre-line; }
    .header-common { background: #2c3e50; font-size: 13px; text-align: left; padding-left: 15px; }
    .header-a { background: #566573; }
    .header-b { background: #7f8c8d; }
    .header-c { background: #2c3e50; }
    .doc-footer { text-align: center; font-size: 11px; color: #7f8c8d; margin-top: 30px; padding-top: 20px; border-top: 1px solid #eee; }
    .page-break { page-break-after: always; }
    @media print {
      body { padding: 0; }
      .page { width: 100%; padding: 0; border: none; }
      td, th { -webkit-print-color-adjust: exact; vertical-align: middle !important; }
      .summary-table th { background-color: #34495e !important; color: white !important; }
      .guide-box, .contact-card { border: 2px solid #2c3e50 !important; }
      .header-a, .header-b, .header-c, .header-common { color: white !important; }
    }
"#;

/// HTML 특수문자 이스케이프
fn esc(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 기본 문구로 HTML 제안서를 생성한다
pub fn render_document(
    plans: &[Plan],
    data: &ParsedData,
    summary: &[SummaryEntry],
    identity: &Identity,
) -> String {
    render_document_with_text(plans, data, summary, identity, &ProposalText::default())
}

/// 지정한 문구 설정으로 HTML 제안서를 생성한다
pub fn render_document_with_text(
    plans: &[Plan],
    data: &ParsedData,
    summary: &[SummaryEntry],
    identity: &Identity,
    text: &ProposalText,
) -> String {
    let title = proposal_title(&identity.company);
    let today = Local::now().format("%Y년 %m월 %d일");
    let manager = if identity.manager_name.trim().is_empty() {
        "담당자"
    } else {
        identity.manager_name.trim()
    };

    let mut html = String::with_capacity(32 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(&format!("<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n", esc(&title), CSS));
    html.push_str("<div class=\"page\">\n");

    // 머리말: 병원명 / 제목 / 제안일자 / 담당자 카드
    html.push_str("<header><div>");
    html.push_str(&format!("<div class=\"hospital-brand\">{}</div>", esc(&text.hospital_name)));
    html.push_str(&format!("<div class=\"hospital-sub\">{}</div>", esc(&title)));
    html.push_str(&format!(
        "<div style=\"font-size:11px; color:#666; margin-top:4px;\">제안일자: {}</div>",
        today
    ));
    html.push_str("</div><div class=\"contact-card\">");
    html.push_str("<div class=\"contact-title\">PROPOSAL CONTACT</div>");
    html.push_str(&format!("<div class=\"contact-name\">{} 팀장</div>", esc(manager)));
    html.push_str(&format!("<div class=\"contact-info\">📞 {}</div>", esc(&identity.manager_phone)));
    html.push_str(&format!("<div class=\"contact-info\">✉️ {}</div>", esc(&identity.manager_email)));
    html.push_str("</div></header>\n<div class=\"header-divider\"></div>\n");

    // 섹션 1: 유동적 그룹 선택 안내
    html.push_str("<div class=\"guide-box\">");
    html.push_str(&format!("<span class=\"guide-title\">{}</span>", esc(&text.flexible_title)));
    for rule in &text.flexible_rules {
        html.push_str(&format!("<div class=\"guide-rule\">{}</div>", esc(rule)));
    }
    for note in &text.flexible_note {
        html.push_str(&format!("<div class=\"guide-note\">{}</div>", esc(note)));
    }
    html.push_str(&format!("<div class=\"guide-example\">{}</div>", esc(&text.flexible_example)));
    html.push_str("</div>\n");

    // 섹션 2: 그룹 구성 안내
    html.push_str("<div class=\"program-grid\">");
    html.push_str(&format!(
        "<div class=\"grid-box\"><div class=\"grid-header header-common\">{}</div>",
        esc(&text.groups_title)
    ));
    html.push_str(&format!(
        "<div class=\"grid-header header-common\">{}</div><div class=\"grid-content\">{}</div></div>",
        esc(&text.common_header),
        esc(&text.common_items)
    ));
    for (header, items, class) in [
        (&text.group_a_header, &text.group_a_items, "header-a"),
        (&text.group_b_header, &text.group_b_items, "header-b"),
        (&text.group_c_header, &text.group_c_items, "header-c"),
    ] {
        html.push_str(&format!(
            "<div class=\"grid-box\"><div class=\"grid-header {}\">{}</div><div class=\"grid-content\">{}</div></div>",
            class,
            esc(&header.replace('\n', " ")),
            esc(items)
        ));
    }
    html.push_str("</div>\n");

    // 섹션 3: 프로그램 요약
    html.push_str(&format!(
        "<div class=\"section\"><div class=\"sec-title\">{}</div>",
        esc(&text.summary_title)
    ));
    html.push_str("<table class=\"summary-table\"><thead><tr><th style=\"width:25%\">구분</th>");
    for plan in plans {
        html.push_str(&format!("<th>{}</th>", esc(&plan.name)));
    }
    html.push_str("</tr></thead><tbody>");
    let summary_rows: [(&str, Vec<&str>); 3] = [
        ("A그룹", summary.iter().map(|s| s.a.as_str()).collect()),
        ("B그룹", summary.iter().map(|s| s.b.as_str()).collect()),
        ("C그룹", summary.iter().map(|s| s.c.as_str()).collect()),
    ];
    for (label, vals) in &summary_rows {
        html.push_str(&format!("<tr><td class=\"summary-header\">{}</td>", label));
        for val in vals {
            html.push_str(&format!("<td class=\"text-center\">{}</td>", esc(val)));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>\n<div class=\"page-break\"></div>\n");

    // 섹션 4~6: A/B/C 상세 (세로 병합)
    html.push_str(&render_table(&text.section_a_title, &data.a, plans, false, None, true));
    html.push_str(&render_table(&text.section_b_title, &data.b, plans, false, Some(&text.footnote_b), true));
    html.push_str(&render_table(&text.section_c_title, &data.c, plans, false, Some(&text.footnote_c), true));

    html.push_str("<div class=\"page-break\"></div>\n");

    // 섹션 7: 장비 + 공통 혈액 (병합 없음, 세부 태그 표시)
    let mut equip_common: Vec<Item> = data.equip.clone();
    equip_common.extend(data.common_blood.iter().cloned());
    html.push_str(&render_table(&text.section_equip_title, &equip_common, plans, true, None, false));

    html.push_str(&format!("<div class=\"doc-footer\">{}</div>\n", esc(&text.footer)));
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// 카테고리 테이블 하나를 렌더링한다
fn render_table(
    title: &str,
    items: &[Item],
    plans: &[Plan],
    show_sub: bool,
    footnote: Option<&str>,
    merge: bool,
) -> String {
    if items.is_empty() {
        return String::new();
    }

    let grid = display_grid(items);
    let spans = if merge {
        compute_spans(&grid)
    } else {
        SpanGrid::unit(grid.len(), plans.len())
    };

    let mut body = String::new();
    for (r, item) in items.iter().enumerate() {
        body.push_str("<tr><td class=\"item-name-cell\">");
        if show_sub && !item.category_tag.is_empty() {
            body.push_str(&format!("<span class=\"cat-tag\">[{}]</span> ", esc(&item.category_tag)));
        }
        body.push_str(&esc(&item.name));
        if !item.description.is_empty() {
            body.push_str(&format!(" <span class=\"item-desc\">{}</span>", esc(&item.description)));
        }
        body.push_str("</td>");

        for c in 0..plans.len() {
            if spans.is_absorbed(r, c) {
                continue;
            }
            let val = &grid[r][c];
            let mut class = String::from("text-center");
            if val == "O" {
                class.push_str(" text-bold");
            } else if val.contains("선택") {
                class.push_str(" text-navy text-bold");
            }
            let span = spans.span(r, c);
            if span > 1 {
                body.push_str(&format!(
                    "<td rowspan=\"{}\" class=\"{}\">{}</td>",
                    span,
                    class,
                    esc(val)
                ));
            } else {
                body.push_str(&format!("<td class=\"{}\">{}</td>", class, esc(val)));
            }
        }
        body.push_str("</tr>");
    }

    let mut header = String::from("<tr><th style=\"width:28%\">검사 항목</th>");
    for plan in plans {
        header.push_str(&format!("<th>{}</th>", esc(&plan.name)));
    }
    header.push_str("</tr>");

    let footer = footnote
        .map(|f| format!("<div class=\"table-footer\">{}</div>", esc(f)))
        .unwrap_or_default();

    format!(
        "<div class=\"section\"><div class=\"sec-title\">{}</div>\
         <table><thead>{}</thead><tbody>{}</tbody></table>{}</div>\n",
        esc(title),
        header,
        body,
        footer
    )
}
