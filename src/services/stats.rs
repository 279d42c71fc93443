//! Statistics service

use chrono::{DateTime, Local, TimeZone};

use crate::{
    analytics,
    api::stats::{AnalyticsResponse, DashboardResponse, PurposeStat},
    config::AnalyticsConfig,
    repository::Repository,
    search,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
    config: AnalyticsConfig,
}

impl StatsService {
    pub fn new(repository: Repository, config: AnalyticsConfig) -> Self {
        Self { repository, config }
    }

    /// Analytics as of now, in server local time
    pub fn analytics(&self) -> AnalyticsResponse {
        self.analytics_at(&Local::now())
    }

    /// Analytics recomputed from the full collection as of `now`
    pub fn analytics_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> AnalyticsResponse {
        let visitors = self.repository.visitors.list();
        let total = analytics::total_count(&visitors);

        let purpose_distribution = analytics::purpose_distribution(&visitors, self.config.top_n)
            .into_iter()
            .map(|p| PurposeStat {
                share_percent: analytics::share_percent(p.count, total),
                purpose: p.purpose,
                count: p.count,
            })
            .collect();

        AnalyticsResponse {
            total_visitors: total,
            today_visitors: analytics::today_count(&visitors, now),
            weekly_visitors: analytics::this_week_count(
                &visitors,
                now,
                self.config.week_start.weekday(),
            ),
            active_visitors: analytics::active_count(&visitors),
            check_outs_today: analytics::check_outs_today(&visitors, now),
            completed_visits: analytics::completed_visits(&visitors),
            average_stay_minutes: analytics::average_stay_minutes(&visitors),
            peak_hours: analytics::peak_hours(&visitors, &now.timezone(), self.config.top_n),
            purpose_distribution,
        }
    }

    /// Dashboard summary as of now, in server local time
    pub fn dashboard(&self) -> DashboardResponse {
        self.dashboard_at(&Local::now())
    }

    pub fn dashboard_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardResponse {
        let visitors = self.repository.visitors.list();

        DashboardResponse {
            total_visitors: analytics::total_count(&visitors),
            today_check_ins: analytics::today_count(&visitors, now),
            active_visitors: analytics::active_count(&visitors),
            pending_pre_approvals: search::pending_pre_approvals(&visitors).len(),
            recent_visitors: analytics::recent(&visitors, self.config.recent_limit),
        }
    }
}
