use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// 未设置上课日时课时估算的保底值
///
/// 与旧系统保持一致：daysOfLessonInWeek 为空时每月按 4 节课估算。
pub const DEFAULT_LESSONS_PER_MONTH: u32 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Class {
    // 班级ID
    pub id: i64,
    // 班级名称
    pub class_name: String,
    // 授课教师ID（0..1）
    pub teacher_id: Option<i64>,
    // 每节课学费（VND，整数）
    pub fee_per_lesson: i64,
    // 每节课教师工资（VND，整数）
    pub wage_per_lesson: i64,
    // 班级容量上限
    pub max_students: i64,
    // 是否开放（软删除/结课标记）
    pub is_available: bool,
    // 课表；未设置时对任意日期放行
    pub schedule: Option<ClassSchedule>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 班级课表：起止日期 + 每周上课日
///
/// 上课日采用 0-6 编号，周日为 0（与旧系统的 getDay() 约定一致）。
/// 所有日期按天粒度比较，统一规范化为 UTC 零点，避免时区造成的
/// 星期错位。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSchedule {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_of_lesson_in_week: Vec<u32>,
}

impl ClassSchedule {
    /// 判断某个日历日是否是合法上课日
    ///
    /// 不合法的情况：早于开课日、晚于结课日、星期不在每周上课日内。
    pub fn is_legal_lesson_date(&self, date: NaiveDate) -> bool {
        if date < self.start_date || date > self.end_date {
            return false;
        }
        self.days_of_lesson_in_week
            .contains(&date.weekday().num_days_from_sunday())
    }

    /// 估算 (year, month) 这个月内的课时数
    ///
    /// 逐日枚举该月日历日，统计星期落在每周上课日内的天数。
    /// 上课日为空时返回保底值 4。
    pub fn estimate_lessons_in_month(&self, month: u32, year: i32) -> u32 {
        if self.days_of_lesson_in_week.is_empty() {
            return DEFAULT_LESSONS_PER_MONTH;
        }

        let mut count = 0;
        let mut day = 1;
        while let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            if self
                .days_of_lesson_in_week
                .contains(&date.weekday().num_days_from_sunday())
            {
                count += 1;
            }
            day += 1;
        }
        count
    }

    /// 课表跨越的所有日历月，按时间顺序返回 (month, year)
    ///
    /// 起止月均包含在内；报名时每个月生成一条学费账单。
    pub fn months_spanned(&self) -> Vec<(u32, i32)> {
        let mut months = Vec::new();
        let (mut year, mut month) = (self.start_date.year(), self.start_date.month());
        let (end_year, end_month) = (self.end_date.year(), self.end_date.month());

        while (year, month) <= (end_year, end_month) {
            months.push((month, year));
            if month == 12 {
                month = 1;
                year += 1;
            } else {
                month += 1;
            }
        }
        months
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mon_wed_fri_schedule() -> ClassSchedule {
        ClassSchedule {
            start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            days_of_lesson_in_week: vec![1, 3, 5],
        }
    }

    #[test]
    fn test_legal_lesson_date() {
        let schedule = mon_wed_fri_schedule();
        // 2025-08-04 是周一
        assert!(schedule.is_legal_lesson_date(NaiveDate::from_ymd_opt(2025, 8, 4).unwrap()));
        // 2025-08-06 是周三
        assert!(schedule.is_legal_lesson_date(NaiveDate::from_ymd_opt(2025, 8, 6).unwrap()));
    }

    #[test]
    fn test_illegal_weekday() {
        let schedule = mon_wed_fri_schedule();
        // 2025-08-05 是周二
        assert!(!schedule.is_legal_lesson_date(NaiveDate::from_ymd_opt(2025, 8, 5).unwrap()));
        // 2025-08-03 是周日
        assert!(!schedule.is_legal_lesson_date(NaiveDate::from_ymd_opt(2025, 8, 3).unwrap()));
    }

    #[test]
    fn test_date_out_of_bounds() {
        let schedule = mon_wed_fri_schedule();
        // 开课日之前的周一
        assert!(!schedule.is_legal_lesson_date(NaiveDate::from_ymd_opt(2025, 7, 28).unwrap()));
        // 结课日之后的周三
        assert!(!schedule.is_legal_lesson_date(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()));
    }

    #[test]
    fn test_boundary_dates_inclusive() {
        let schedule = ClassSchedule {
            start_date: NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 8, 29).unwrap(),
            days_of_lesson_in_week: vec![1, 5],
        };
        // 起止日当天本身是上课日时合法
        assert!(schedule.is_legal_lesson_date(schedule.start_date));
        assert!(schedule.is_legal_lesson_date(schedule.end_date));
    }

    #[test]
    fn test_estimate_august_2025() {
        // 2025 年 8 月共 31 天，周一 4 天 + 周三 4 天 + 周五 5 天 = 13
        let schedule = mon_wed_fri_schedule();
        assert_eq!(schedule.estimate_lessons_in_month(8, 2025), 13);
    }

    #[test]
    fn test_estimate_fallback_when_no_days() {
        let schedule = ClassSchedule {
            start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
            days_of_lesson_in_week: vec![],
        };
        assert_eq!(
            schedule.estimate_lessons_in_month(8, 2025),
            DEFAULT_LESSONS_PER_MONTH
        );
    }

    #[test]
    fn test_months_spanned_two_months() {
        let schedule = mon_wed_fri_schedule();
        assert_eq!(schedule.months_spanned(), vec![(8, 2025), (9, 2025)]);
    }

    #[test]
    fn test_months_spanned_across_year() {
        let schedule = ClassSchedule {
            start_date: NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
            days_of_lesson_in_week: vec![2, 4],
        };
        assert_eq!(
            schedule.months_spanned(),
            vec![(11, 2025), (12, 2025), (1, 2026), (2, 2026)]
        );
    }
}
