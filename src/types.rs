//! 제안서 데이터 모델
//!
//! UI/CLI 경계를 넘는 타입(Plan, PriceTierOption, Identity 등)은
//! serde 직렬화를 지원한다.

use serde::{Deserialize, Serialize};

/// 그룹별 기본 선택 개수 (A/B/C)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupDefaults {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl GroupDefaults {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }
}

/// 템플릿에서 발견된 금액대 컬럼 하나
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTierOption {
    /// 헤더 셀 원문 (예: "70만원")
    pub label: String,
    /// 1-base 컬럼 번호
    pub col_idx: usize,
    /// 그룹별 기본 선택 개수 (수동 테이블 또는 스캔 결과)
    pub defaults: GroupDefaults,
}

/// 사용자 구성 플랜: 금액대 컬럼 하나에 묶인 이름 있는 상품
///
/// 그룹 규칙은 자유 입력 텍스트:
/// - 빈 문자열: 시트 값을 그대로 사용
/// - `"-"`: 해당 그룹 전체를 미선택 처리
/// - 그 외: "선택" 셀 값을 해당 텍스트로 교체 (예: "선택 5")
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plan {
    pub name: String,
    pub col_idx: usize,
    pub a_rule: String,
    pub b_rule: String,
    pub c_rule: String,
}

impl Plan {
    /// 카테고리에 대응하는 그룹 규칙 (A/B/C 외에는 빈 문자열)
    pub fn group_rule(&self, category: Category) -> &str {
        match category {
            Category::A => &self.a_rule,
            Category::B => &self.b_rule,
            Category::C => &self.c_rule,
            _ => "",
        }
    }
}

/// 검진 항목 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    A,
    B,
    C,
    Equip,
    CommonBlood,
}

impl Category {
    /// 선택 규칙/이월 캐시가 적용되는 그룹인지 (A/B/C)
    pub fn is_select_group(self) -> bool {
        matches!(self, Category::A | Category::B | Category::C)
    }
}

/// 시트에서 추출한 검진 항목 한 행
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// 세부 카테고리 태그 (장비검사 카테고리에서만 채워짐)
    pub category_tag: String,
    pub name: String,
    pub description: String,
    /// 플랜 순서와 동일한 순서의 값 목록. 길이는 항상 플랜 수와 같다.
    pub values: Vec<String>,
}

/// 카테고리별 항목 테이블. 시트 행 순서 = 버킷 내 순서.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedData {
    pub a: Vec<Item>,
    pub b: Vec<Item>,
    pub c: Vec<Item>,
    pub equip: Vec<Item>,
    pub common_blood: Vec<Item>,
}

impl ParsedData {
    pub fn bucket(&self, category: Category) -> &[Item] {
        match category {
            Category::A => &self.a,
            Category::B => &self.b,
            Category::C => &self.c,
            Category::Equip => &self.equip,
            Category::CommonBlood => &self.common_blood,
        }
    }

    pub fn bucket_mut(&mut self, category: Category) -> &mut Vec<Item> {
        match category {
            Category::A => &mut self.a,
            Category::B => &mut self.b,
            Category::C => &mut self.c,
            Category::Equip => &mut self.equip,
            Category::CommonBlood => &mut self.common_blood,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
            && self.b.is_empty()
            && self.c.is_empty()
            && self.equip.is_empty()
            && self.common_blood.is_empty()
    }
}

/// 요약 테이블용 플랜별 규칙 요약 (사용자 입력을 그대로 반영)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub name: String,
    pub a: String,
    pub b: String,
    pub c: String,
}

/// 제안서 머리말에 들어가는 회사/담당자 정보
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub company: String,
    pub manager_name: String,
    pub manager_phone: String,
    pub manager_email: String,
}
