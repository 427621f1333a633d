mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

use checkup_proposal::{
    load_price_options, parse_items, render_document_with_text, render_workbook_with_text,
    DefaultsTable, Identity, Plan, PriceTierOption, ProposalText,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Options {
            template,
            json,
            defaults,
        } => {
            let table = load_defaults_table(defaults.as_deref())?;
            let (header_row, options) = load_price_options(&template, &table)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else {
                println!("금액 헤더 행: {}", header_row);
                println!("{:<12} {:>6} {:>4} {:>4} {:>4}", "금액대", "컬럼", "A", "B", "C");
                for opt in &options {
                    println!(
                        "{:<12} {:>6} {:>4} {:>4} {:>4}",
                        opt.label, opt.col_idx, opt.defaults.a, opt.defaults.b, opt.defaults.c
                    );
                }
            }
        }

        Commands::Generate {
            template,
            plans,
            tier,
            company,
            manager,
            phone,
            email,
            format,
            output,
            text,
            defaults,
        } => {
            let table = load_defaults_table(defaults.as_deref())?;
            let proposal_text = match text {
                Some(path) => ProposalText::load(&path)
                    .with_context(|| format!("문구 파일을 읽을 수 없습니다: {}", path.display()))?,
                None => ProposalText::default(),
            };

            let (header_row, options) = load_price_options(&template, &table)?;
            if cli.verbose {
                eprintln!("금액 헤더 행: {}, 옵션 {}개", header_row, options.len());
            }

            let plan_list = build_plans(plans.as_deref(), &tier, &options)?;
            if plan_list.is_empty() {
                bail!("플랜이 없습니다. --plans 또는 --tier로 최소 1개를 지정하세요");
            }

            let (data, summary) = parse_items(&template, header_row, &plan_list)?;
            if data.is_empty() {
                eprintln!("경고: 템플릿에서 항목을 하나도 읽지 못했습니다");
            }

            let identity = Identity {
                company: company.clone(),
                manager_name: manager,
                manager_phone: phone,
                manager_email: email,
            };

            let out_dir = output.unwrap_or_else(|| PathBuf::from("."));
            std::fs::create_dir_all(&out_dir)?;
            let stem = output_stem(&company);

            if format.wants_html() {
                let html =
                    render_document_with_text(&plan_list, &data, &summary, &identity, &proposal_text);
                let path = out_dir.join(format!("{}.html", stem));
                std::fs::write(&path, html)?;
                println!("HTML 저장: {}", path.display());
            }
            if format.wants_xlsx() {
                let bytes =
                    render_workbook_with_text(&plan_list, &data, &summary, &identity, &proposal_text)?;
                let path = out_dir.join(format!("{}.xlsx", stem));
                std::fs::write(&path, bytes)?;
                println!("Excel 저장: {}", path.display());
            }
        }
    }

    Ok(())
}

fn load_defaults_table(path: Option<&Path>) -> anyhow::Result<DefaultsTable> {
    match path {
        Some(p) => DefaultsTable::load(p)
            .with_context(|| format!("기본값 테이블을 읽을 수 없습니다: {}", p.display())),
        None => Ok(DefaultsTable::default()),
    }
}

/// 플랜 목록 구성: JSON 파일이 우선, 없으면 --tier 지정으로 자동 구성
fn build_plans(
    plans_path: Option<&Path>,
    tiers: &[String],
    options: &[PriceTierOption],
) -> anyhow::Result<Vec<Plan>> {
    if let Some(path) = plans_path {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("플랜 파일을 읽을 수 없습니다: {}", path.display()))?;
        let plans: Vec<Plan> = serde_json::from_str(&content)
            .with_context(|| format!("플랜 JSON 형식이 올바르지 않습니다: {}", path.display()))?;
        return Ok(plans);
    }

    let mut plans = Vec::new();
    for tier in tiers {
        let opt = options
            .iter()
            .find(|o| o.label == *tier)
            .with_context(|| format!("템플릿에 없는 금액대입니다: {}", tier))?;
        plans.push(plan_from_option(opt));
    }
    Ok(plans)
}

/// 금액대 옵션 하나를 기본 규칙이 채워진 플랜으로 바꾼다
/// (기본 개수 N > 0 이면 "선택 N", 0이면 "-")
fn plan_from_option(opt: &PriceTierOption) -> Plan {
    let rule = |n: u32| {
        if n > 0 {
            format!("선택 {}", n)
        } else {
            "-".to_string()
        }
    };
    Plan {
        name: opt.label.clone(),
        col_idx: opt.col_idx,
        a_rule: rule(opt.defaults.a),
        b_rule: rule(opt.defaults.b),
        c_rule: rule(opt.defaults.c),
    }
}

/// 다운로드 파일 이름 규칙: 2026_{회사명 또는 "기업"}_건강검진_제안서
fn output_stem(company: &str) -> String {
    let company = company.trim();
    let company = if company.is_empty() { "기업" } else { company };
    format!("2026_{}_건강검진_제안서", company)
}
