use crate::domain::dashboard_service::LeadCounts;
use shared::DashboardStats;

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_stats_dto(counts: LeadCounts) -> DashboardStats {
        DashboardStats {
            total: counts.total,
            players: counts.players,
            supply: counts.supply,
            facilities: counts.facilities,
        }
    }
}
