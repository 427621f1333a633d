use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "checkup-proposal")]
#[command(about = "기업 임직원 건강검진 제안서 생성 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 템플릿에서 금액대 옵션을 나열
    Options {
        /// 템플릿 엑셀 파일 경로
        #[arg(required = true)]
        template: PathBuf,

        /// JSON으로 출력
        #[arg(long)]
        json: bool,

        /// 수동 기본값 테이블 JSON (생략 시 내장 테이블)
        #[arg(long)]
        defaults: Option<PathBuf>,
    },

    /// 제안서 생성 (HTML/Excel)
    Generate {
        /// 템플릿 엑셀 파일 경로
        #[arg(required = true)]
        template: PathBuf,

        /// 플랜 구성 JSON 파일 (Plan 배열)
        #[arg(short, long)]
        plans: Option<PathBuf>,

        /// 금액대 라벨로 플랜 자동 구성 (예: --tier 70만원, 반복 지정 가능)
        #[arg(short, long)]
        tier: Vec<String>,

        /// 회사명
        #[arg(long, default_value = "")]
        company: String,

        /// 담당자 이름
        #[arg(long, default_value = "")]
        manager: String,

        /// 담당자 연락처
        #[arg(long, default_value = "")]
        phone: String,

        /// 담당자 이메일
        #[arg(long, default_value = "")]
        email: String,

        /// 출력 형식 (html/xlsx/both)
        #[arg(short, long, default_value = "both")]
        format: OutputFormat,

        /// 출력 디렉토리 (기본: 현재 디렉토리)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 안내문/그룹 구성 문구 JSON (생략 시 내장 문구)
        #[arg(long)]
        text: Option<PathBuf>,

        /// 수동 기본값 테이블 JSON (생략 시 내장 테이블)
        #[arg(long)]
        defaults: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Default)]
pub enum OutputFormat {
    Html,
    Xlsx,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn wants_html(self) -> bool {
        matches!(self, OutputFormat::Html | OutputFormat::Both)
    }

    pub fn wants_xlsx(self) -> bool {
        matches!(self, OutputFormat::Xlsx | OutputFormat::Both)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "xlsx" | "excel" => Ok(OutputFormat::Xlsx),
            "both" => Ok(OutputFormat::Both),
            _ => Err(format!("알 수 없는 형식: {}. html, xlsx, both 중 하나를 쓰세요", s)),
        }
    }
}
