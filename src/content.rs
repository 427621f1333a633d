//! 제안서 고정 안내문/그룹 구성 텍스트
//!
//! 알고리즘이 아닌 운영 콘텐츠이므로 렌더러에 하드코딩하지 않고
//! 기본값을 내장한 설정 구조체로 둔다. 문구 개정 시 JSON으로 교체한다.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 제안서에 들어가는 고정 텍스트 블록 일체
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalText {
    pub hospital_name: String,
    /// 섹션 1 제목
    pub flexible_title: String,
    /// 섹션 1 본문 (그룹 교차 선택 규칙, 줄 단위)
    pub flexible_rules: Vec<String>,
    /// 섹션 1 비고 (장비 안내, 줄 단위)
    pub flexible_note: Vec<String>,
    /// 섹션 1 예시 문구
    pub flexible_example: String,
    /// 섹션 2 제목
    pub groups_title: String,
    pub common_header: String,
    pub common_items: String,
    pub group_a_header: String,
    pub group_a_items: String,
    pub group_b_header: String,
    pub group_b_items: String,
    pub group_c_header: String,
    pub group_c_items: String,
    /// 섹션 3~7 제목
    pub summary_title: String,
    pub section_a_title: String,
    pub section_b_title: String,
    pub section_c_title: String,
    pub section_equip_title: String,
    /// B/C 테이블 각주
    pub footnote_b: String,
    pub footnote_c: String,
    /// 문서 말미 안내 문구
    pub footer: String,
}

impl Default for ProposalText {
    fn default() -> Self {
        Self {
            hospital_name: "뉴고려병원".into(),
            flexible_title: "1. 유동적 그룹 선택 시스템 (Flexible Option)".into(),
            flexible_rules: vec![
                "• A그룹 2개 ⇄ B그룹 1개 로 변경 선택 가능".into(),
                "• A그룹 4개 ⇄ C그룹 1개 로 변경 선택 가능".into(),
                "• 유전자검사 20종 (기본제공) ⇄ A그룹 1개 로 변경 가능".into(),
                "• 공단 위암 대상자 위내시경 진행 시 A그룹 추가 1가지 선택 가능".into(),
            ],
            flexible_note: vec![
                "[비고: MRI 정밀 장비 안내]".into(),
                "Full Protocol Scan 시행 (Spot protocol 아님) / 최신 3.0T MRI 장비 보유".into(),
            ],
            flexible_example: "(예시: 70만원형 기본 [A5, B1, C1] → 변경 [A1, B3, C1] 또는 [A1, B2, C2] 등 자유롭게 조합 가능)".into(),
            groups_title: "2. 상세 검진 항목 및 그룹 구성".into(),
            common_header: "공통 항목 (위내시경 포함)".into(),
            common_items: "간기능 | 간염 | 순환기계 | 당뇨 | 췌장기능 | 철결핍성 | 빈혈 | 혈액질환 | 전해질 | 신장기능 | 골격계질환\n\
                감염성 | 갑상선기능 | 부갑상선기능 | 종양표지자 | 소변 등 80여종 혈액(소변)검사\n\
                심전도 | 신장 | 체중 | 혈압 | 시력 | 청력 | 체성분 | 건강유형분석 | 폐기능 | 안저 | 안압\n\
                혈액점도검사 | 유전자20종 | 흉부X-ray | 복부초음파 | 위수면내시경\n\
                (여)자궁경부세포진 | (여)유방촬영 - #30세이상 권장#".into(),
            group_a_header: "A 그룹\n(정밀)".into(),
            group_a_items: "[01] 갑상선초음파  [10] 골다공증QCT+비타민D\n\
                [02] 경동맥초음파  [11] 혈관협착도ABI\n\
                [03] (여)경질초음파  [12] (여)액상 자궁경부세포진\n\
                [04] 뇌CT  [13] (여) HPV바이러스\n\
                [05] 폐CT  [14] (여)(혈액)마스토체크:유방암\n\
                [06] 요추CT  [15] (혈액)NK뷰키트\n\
                [07] 경추CT  [16] (여)(혈액)여성호르몬\n\
                [08] 심장MDCT  [17] (남)(혈액)남성호르몬\n\
                [09] 복부비만CT".into(),
            group_b_header: "B 그룹\n(특화)".into(),
            group_b_items: "[가] 대장수면내시경  [마] 부정맥검사S-PATCH\n\
                [나] 심장초음파  [바] [혈액]알레르기검사\n\
                [다] (여)유방초음파  [사] [혈액]알츠온:치매위험도\n\
                [라] [분변]대장암_얼리텍  [아] [혈액]간섬유화검사\n\
                [자] 폐렴예방접종:15가".into(),
            group_c_header: "C 그룹\n(VIP)".into(),
            group_c_items: "[A] 뇌MRI+MRA  [D] [혈액]스마트암검사(남6/여7종)\n\
                [B] 경추MRI  [E] [혈액]선천적 유전자검사\n\
                [C] 요추MRI  [F] [혈액]에피클락 (생체나이)".into(),
            summary_title: "3. 검진 프로그램 요약".into(),
            section_a_title: "4. A 그룹 (정밀검사)".into(),
            section_b_title: "5. B 그룹 (특화검사)".into(),
            section_c_title: "6. C 그룹 (VIP검사)".into(),
            section_equip_title: "7. 기초 장비 및 혈액 검사".into(),
            footnote_b: "* A그룹 2개를 제외하고 B그룹 1개 선택 가능".into(),
            footnote_c: "* A그룹 4개를 제외하고 C그룹 1개 선택 가능".into(),
            footer: "본 제안서는 귀사의 임직원 건강 증진을 위해 작성되었으며, 세부 검진 항목 및 일정은 협의에 따라 조정될 수 있습니다.".into(),
        }
    }
}

impl ProposalText {
    /// JSON 파일에서 문구 교체본을 읽는다
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let text = serde_json::from_str(&content)?;
        Ok(text)
    }
}

/// 제안서 제목. 회사명이 비어 있으면 범용 제목을 쓴다.
pub fn proposal_title(company: &str) -> String {
    let company = company.trim();
    if company.is_empty() {
        "2026 기업 임직원 건강검진 제안서".into()
    } else {
        format!("2026 {} 임직원 건강검진 제안서", company)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proposal_title() {
        assert_eq!(proposal_title("한빛상사"), "2026 한빛상사 임직원 건강검진 제안서");
        assert_eq!(proposal_title("  "), "2026 기업 임직원 건강검진 제안서");
    }

    #[test]
    fn test_text_partial_override() {
        // 일부 필드만 있는 JSON도 기본값과 병합되어야 한다
        let text: ProposalText =
            serde_json::from_str(r#"{"hospital_name":"서울중앙병원"}"#).unwrap();
        assert_eq!(text.hospital_name, "서울중앙병원");
        assert!(text.footnote_b.contains("B그룹"));
        assert_eq!(text.flexible_rules.len(), 4);
    }
}
