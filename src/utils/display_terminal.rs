//! 터미널 출력 포맷팅 유틸리티
//!
//! 프로바이더 초기화 과정을 터미널에 보여주는 함수들입니다.
//! 박스 형태의 제목, 진행 단계, 인스턴스 목록, 최종 요약을 출력합니다.

use crate::bootstrap::ProviderSummary;

const CONTENT_WIDTH: usize = 50;

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║               INITIALIZING PROVIDERS             ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    println!("{}", boxed_title(title));
}

fn boxed_title(title: &str) -> String {
    let border = "═".repeat(CONTENT_WIDTH);
    format!(
        "╔{}╗\n║{:^width$}║\n╚{}╝",
        border,
        title,
        border,
        width = CONTENT_WIDTH
    )
}

/// 진행 단계 시작을 표시합니다
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 처리된 항목 수와 함께 표시합니다
///
/// ```text
/// ✓ Step 2: database provider (2 items)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 서브 작업의 상태를 표시합니다
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 종류별 프로바이더 요약을 단계 형태로 출력합니다
///
/// ```text
/// ✓ Step 1: logger provider (1 items)
///    ├─ app: ready
/// ✓ Step 2: database provider (2 items)
///    ├─ main: ready
///    ├─ reporting: ready
/// ```
pub fn print_provider_summary(summaries: &[ProviderSummary]) {
    for (index, summary) in summaries.iter().enumerate() {
        let step = u8::try_from(index + 1).unwrap_or(u8::MAX);
        print_step_complete(
            step,
            &format!("{} provider", summary.kind),
            summary.names.len(),
        );
        for name in &summary.names {
            print_sub_task(name, "ready");
        }
    }
}

/// 최종 완료 요약을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║           🎉 RESOURCE PROVIDERS READY            ║
/// ╚══════════════════════════════════════════════════╝
///    📦 Kinds: 3
///    🔧 Instances: 5
/// ```
pub fn print_final_summary(kinds: usize, instances: usize) {
    println!();
    print_boxed_title("🎉 RESOURCE PROVIDERS READY");
    println!("   📦 Kinds: {}", kinds);
    println!("   🔧 Instances: {}", instances);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_title_layout() {
        let boxed = boxed_title("READY");
        let lines: Vec<&str> = boxed.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('╔') && lines[0].ends_with('╗'));
        assert_eq!(lines[0].chars().count(), CONTENT_WIDTH + 2);
        assert!(lines[1].contains("READY"));
        assert_eq!(lines[1].chars().count(), lines[0].chars().count());
        assert!(lines[2].starts_with('╚'));
    }
}
