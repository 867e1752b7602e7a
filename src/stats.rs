use std::time::Duration;

/// 会话统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionStats {
    pub attempts: usize,
    pub successes: usize,
    pub failures: usize,
    pub skipped: usize,
    pub total_latency: Duration,
    pub last_latency: Option<Duration>,
}

impl SessionStats {
    /// 记录一次已结算的请求
    pub fn record_settled(&mut self, succeeded: bool, latency: Duration) {
        self.attempts += 1;
        if succeeded {
            self.successes += 1;
        } else {
            self.failures += 1;
        }
        self.total_latency += latency;
        self.last_latency = Some(latency);
    }

    /// 记录一次被忽略的提交
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// 平均请求耗时
    pub fn average_latency(&self) -> Option<Duration> {
        if self.attempts == 0 {
            return None;
        }
        Some(self.total_latency / self.attempts as u32)
    }
}

/// 打印会话统计
pub fn print_session_stats(stats: &SessionStats) {
    println!("\n📊 会话统计报告:");
    println!("═══════════════════════════════════════");
    println!("   请求次数: {}", stats.attempts);
    println!("   成功: {} 次", stats.successes);
    println!("   失败: {} 次", stats.failures);
    println!("   忽略的提交: {} 次", stats.skipped);

    if let Some(avg) = stats.average_latency() {
        println!("\n⏱️  耗时:");
        println!("   平均: {}", format_duration(avg));
        if let Some(last) = stats.last_latency {
            println!("   最近一次: {}", format_duration(last));
        }
        println!("   累计: {}", format_duration(stats.total_latency));
    }
}

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
