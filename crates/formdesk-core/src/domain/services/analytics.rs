//! Dashboard and per-form analytics

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::aggregates::{Form, FormResponse};
use crate::domain::value_objects::{DeviceType, EntityId, FieldId};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormAnalytics {
    pub form_id: EntityId,
    pub views: u64,
    pub responses: u64,
    /// Percentage of views that turned into a response
    pub conversion_rate: f64,
    pub daily: Vec<DailyCount>,
    pub devices: DeviceBreakdown,
    pub field_completion: Vec<FieldCompletion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceBreakdown {
    pub desktop: u64,
    pub mobile: u64,
    pub tablet: u64,
}

impl DeviceBreakdown {
    pub fn record(&mut self, device: DeviceType) {
        match device {
            DeviceType::Desktop => self.desktop += 1,
            DeviceType::Mobile => self.mobile += 1,
            DeviceType::Tablet => self.tablet += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.desktop + self.mobile + self.tablet
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldCompletion {
    pub field_id: FieldId,
    pub label: String,
    pub answered: u64,
    /// Percentage of responses that answered the field
    pub rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub total_forms: usize,
    pub published_forms: usize,
    pub total_responses: u64,
    pub total_views: u64,
    pub recent_responses: Vec<RecentResponse>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecentResponse {
    pub form_id: EntityId,
    pub form_title: String,
    pub response_id: EntityId,
    pub submitted_at: DateTime<Utc>,
}

/// Longest trailing window a per-form report covers
pub const MAX_WINDOW_DAYS: u32 = 365;

pub struct AnalyticsService;

impl AnalyticsService {
    /// Analytics for one form over a trailing window of `window_days` ending on `today`
    ///
    /// The window is clamped to `1..=MAX_WINDOW_DAYS`.
    pub fn form_analytics(
        form: &Form,
        responses: &[FormResponse],
        today: NaiveDate,
        window_days: u32,
    ) -> FormAnalytics {
        let total = responses.len() as u64;
        let views = form.view_count();

        let mut devices = DeviceBreakdown::default();
        let mut per_day: HashMap<NaiveDate, u64> = HashMap::new();
        for response in responses {
            devices.record(response.device());
            *per_day.entry(response.submitted_at().date_naive()).or_default() += 1;
        }

        let window_days = window_days.clamp(1, MAX_WINDOW_DAYS);
        let daily = (0..i64::from(window_days))
            .rev()
            .filter_map(|offset| today.checked_sub_signed(Duration::days(offset)))
            .map(|date| DailyCount { date, count: per_day.get(&date).copied().unwrap_or(0) })
            .collect();

        let field_completion = form
            .fields()
            .iter()
            .map(|field| {
                let answered = responses
                    .iter()
                    .filter(|r| !r.answer_text(&field.id).trim().is_empty())
                    .count() as u64;
                FieldCompletion {
                    field_id: field.id.clone(),
                    label: field.label.clone(),
                    answered,
                    rate: percentage(answered, total),
                }
            })
            .collect();

        FormAnalytics {
            form_id: form.id().clone(),
            views,
            responses: total,
            conversion_rate: percentage(total, views),
            daily,
            devices,
            field_completion,
        }
    }

    /// Owner-level totals plus the most recent responses across forms
    pub fn dashboard(forms: &[Form], responses: &[FormResponse], recent_limit: usize) -> Dashboard {
        let titles: HashMap<&EntityId, &str> = forms.iter().map(|f| (f.id(), f.title())).collect();

        let mut recent: Vec<&FormResponse> = responses
            .iter()
            .filter(|r| titles.contains_key(r.form_id()))
            .collect();
        recent.sort_by(|a, b| b.submitted_at().cmp(&a.submitted_at()));

        let recent_responses = recent
            .into_iter()
            .take(recent_limit)
            .map(|r| RecentResponse {
                form_id: r.form_id().clone(),
                form_title: titles.get(r.form_id()).copied().unwrap_or_default().to_string(),
                response_id: r.id().clone(),
                submitted_at: r.submitted_at(),
            })
            .collect();

        Dashboard {
            total_forms: forms.len(),
            published_forms: forms.iter().filter(|f| f.is_published()).count(),
            total_responses: forms.iter().map(Form::response_count).sum(),
            total_views: forms.iter().map(Form::view_count).sum(),
            recent_responses,
        }
    }
}

fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64 * 1000.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{FieldKind, FieldList};
    use chrono::TimeZone;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn published_form() -> (Form, FieldId, FieldId) {
        let mut fields = FieldList::new();
        let name = fields.append(FieldKind::Text).id.clone();
        let email = fields.append(FieldKind::Email).id.clone();
        let mut form = Form::create_with_fields(EntityId::new(), "Signup", "", fields);
        form.publish().unwrap();
        (form, name, email)
    }

    fn response_on(form: &Form, day: u32, answers: BTreeMap<FieldId, serde_json::Value>, ua: &str) -> FormResponse {
        FormResponse::create(form.id().clone(), answers, ua)
            .with_submitted_at(Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap())
    }

    #[test]
    fn test_form_analytics() {
        let (mut form, name, email) = published_form();
        for _ in 0..8 {
            form.record_view();
        }

        let responses = vec![
            response_on(&form, 10, BTreeMap::from([(name.clone(), json!("A")), (email.clone(), json!("a@b.com"))]), "iPhone Mobile"),
            response_on(&form, 10, BTreeMap::from([(name.clone(), json!("B"))]), "Windows NT"),
            response_on(&form, 8, BTreeMap::from([(name.clone(), json!("C"))]), "iPad"),
            response_on(&form, 1, BTreeMap::from([(name.clone(), json!("D"))]), "Windows NT"),
        ];

        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let analytics = AnalyticsService::form_analytics(&form, &responses, today, 7);

        assert_eq!(analytics.views, 8);
        assert_eq!(analytics.responses, 4);
        assert_eq!(analytics.conversion_rate, 50.0);

        assert_eq!(analytics.daily.len(), 7);
        assert_eq!(analytics.daily.first().unwrap().date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(analytics.daily.last().unwrap(), &DailyCount { date: today, count: 2 });
        assert_eq!(analytics.daily.iter().map(|d| d.count).sum::<u64>(), 3);

        assert_eq!(analytics.devices, DeviceBreakdown { desktop: 2, mobile: 1, tablet: 1 });

        assert_eq!(analytics.field_completion[0].answered, 4);
        assert_eq!(analytics.field_completion[0].rate, 100.0);
        assert_eq!(analytics.field_completion[1].answered, 1);
        assert_eq!(analytics.field_completion[1].rate, 25.0);
    }

    #[test]
    fn test_no_views_means_zero_conversion() {
        let (form, _, _) = published_form();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let analytics = AnalyticsService::form_analytics(&form, &[], today, 0);
        assert_eq!(analytics.conversion_rate, 0.0);
        assert_eq!(analytics.daily, vec![DailyCount { date: today, count: 0 }]);
    }

    #[test]
    fn test_window_is_capped() {
        let (form, _, _) = published_form();
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let analytics = AnalyticsService::form_analytics(&form, &[], today, u32::MAX);
        assert_eq!(analytics.daily.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(analytics.daily.last().unwrap().date, today);
    }

    #[test]
    fn test_window_stops_at_earliest_date() {
        let (form, _, _) = published_form();
        let analytics = AnalyticsService::form_analytics(&form, &[], NaiveDate::MIN, 30);
        assert_eq!(analytics.daily, vec![DailyCount { date: NaiveDate::MIN, count: 0 }]);
    }

    #[test]
    fn test_dashboard() {
        let (mut published, name, _) = published_form();
        published.record_response(EntityId::new()).unwrap();
        published.record_view();
        let draft = Form::create(published.owner_id().clone(), "Draft", "");

        let responses = vec![
            response_on(&published, 2, BTreeMap::from([(name.clone(), json!("old"))]), ""),
            response_on(&published, 5, BTreeMap::from([(name.clone(), json!("new"))]), ""),
            FormResponse::create(EntityId::new(), BTreeMap::new(), ""),
        ];

        let dashboard = AnalyticsService::dashboard(&[published.clone(), draft], &responses, 5);

        assert_eq!(dashboard.total_forms, 2);
        assert_eq!(dashboard.published_forms, 1);
        assert_eq!(dashboard.total_responses, 1);
        assert_eq!(dashboard.total_views, 1);
        assert_eq!(dashboard.recent_responses.len(), 2);
        assert_eq!(dashboard.recent_responses[0].response_id, *responses[1].id());
        assert_eq!(dashboard.recent_responses[0].form_title, "Signup");
    }
}
