#[cfg(all(feature = "vi", feature = "en"))]
compile_error!("Cannot enable both 'vi' and 'en' features at the same time");

#[cfg(feature = "vi")]
pub mod strings {
    pub const MEMBER: &str = "Thành viên";
    pub const NAME: &str = "Họ tên";
    pub const PHONE: &str = "Điện thoại";
    pub const STATUS: &str = "Trạng thái";
    pub const REPUTATION: &str = "Uy tín";
    pub const GROUP: &str = "Dây hụi";
    pub const PERIOD: &str = "Kỳ";
    pub const DEAD_SLOTS: &str = "Chân chết";
    pub const LIVE_SLOTS: &str = "Chân sống";
    pub const REQUIRED: &str = "Phải đóng";
    pub const PAID: &str = "Đã đóng";
    pub const REMAINING: &str = "Còn thiếu";
    pub const SHORTFALL: &str = "Nợ";
    pub const MONTH: &str = "Tháng";
    pub const INFLOW: &str = "Thu dự kiến";
    pub const OUTFLOW: &str = "Chi dự kiến";
    pub const COMMISSION: &str = "Hoa hồng";
    pub const AMOUNT_PER_LIVE: &str = "Mỗi chân sống";
    pub const AMOUNT_PER_DEAD: &str = "Mỗi chân chết";
    pub const TOTAL_POT: &str = "Tổng tiền hốt";
    pub const DEDUCTIONS: &str = "Trừ nợ cũ";
    pub const NET_RECEIVED: &str = "Thực nhận";
    pub const TOTAL_DEBT: &str = "Tổng nợ";
    pub const GROUPS_JOINED: &str = "Số dây tham gia";
    pub const COLLECTIONS: &str = "Số lần hốt";
    pub const ACTIVE_GROUPS: &str = "Dây đang chạy";
    pub const TOTAL_CONTRIBUTED: &str = "Tổng tiền đã đóng";
    pub const TOTAL_PAID_OUT: &str = "Tổng tiền đã hốt";
    pub const MEMBER_COUNT: &str = "Số thành viên";
    pub const STATUS_FULL: &str = "Đã đủ";
    pub const STATUS_PARTIAL: &str = "Thiếu";
    pub const STATUS_UNPAID: &str = "Chưa đóng";
    pub const NO_DEBT: &str = "Không có nợ";
    pub const NO_MEMBERS: &str = "Không tìm thấy thành viên";
    pub const CURRENCY: &str = "đ";
    pub const TIME: &str = "Thời gian";
    pub const AMOUNT: &str = "Số tiền";
    pub const SHARE: &str = "Mệnh giá";
    pub const ACTION: &str = "Hành động";
    pub const SCENARIO: &str = "Diễn giải";
    pub const NO_LOGS: &str = "Chưa có log nào";
    pub const SLOTS: &str = "Số chân";
    pub const NO_GROUPS: &str = "Chưa có dây hụi nào";
    pub const GROUP_ACTIVE: &str = "Đang chạy";
    pub const GROUP_COMPLETED: &str = "Đã mãn";
}

#[cfg(not(feature = "vi"))]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const NAME: &str = "Name";
    pub const PHONE: &str = "Phone";
    pub const STATUS: &str = "Status";
    pub const REPUTATION: &str = "Reputation";
    pub const GROUP: &str = "Group";
    pub const PERIOD: &str = "Period";
    pub const DEAD_SLOTS: &str = "Dead slots";
    pub const LIVE_SLOTS: &str = "Live slots";
    pub const REQUIRED: &str = "Required";
    pub const PAID: &str = "Paid";
    pub const REMAINING: &str = "Remaining";
    pub const SHORTFALL: &str = "Shortfall";
    pub const MONTH: &str = "Month";
    pub const INFLOW: &str = "Est. inflow";
    pub const OUTFLOW: &str = "Est. outflow";
    pub const COMMISSION: &str = "Commission";
    pub const AMOUNT_PER_LIVE: &str = "Per live slot";
    pub const AMOUNT_PER_DEAD: &str = "Per dead slot";
    pub const TOTAL_POT: &str = "Total pot";
    pub const DEDUCTIONS: &str = "Debt deducted";
    pub const NET_RECEIVED: &str = "Net received";
    pub const TOTAL_DEBT: &str = "Total debt";
    pub const GROUPS_JOINED: &str = "Groups joined";
    pub const COLLECTIONS: &str = "Collections";
    pub const ACTIVE_GROUPS: &str = "Active groups";
    pub const TOTAL_CONTRIBUTED: &str = "Total contributed";
    pub const TOTAL_PAID_OUT: &str = "Total paid out";
    pub const MEMBER_COUNT: &str = "Members";
    pub const STATUS_FULL: &str = "Paid in full";
    pub const STATUS_PARTIAL: &str = "Partial";
    pub const STATUS_UNPAID: &str = "Unpaid";
    pub const NO_DEBT: &str = "No outstanding debt";
    pub const NO_MEMBERS: &str = "No matching members";
    pub const CURRENCY: &str = "VND";
    pub const TIME: &str = "Time";
    pub const AMOUNT: &str = "Amount";
    pub const SHARE: &str = "Share";
    pub const ACTION: &str = "Action";
    pub const SCENARIO: &str = "Scenario";
    pub const NO_LOGS: &str = "No audit logs yet";
    pub const SLOTS: &str = "Slots";
    pub const NO_GROUPS: &str = "No groups yet";
    pub const GROUP_ACTIVE: &str = "Active";
    pub const GROUP_COMPLETED: &str = "Completed";
}

pub use strings::*;

#[cfg(feature = "vi")]
pub fn plan_title(group: impl std::fmt::Display, period: u32) -> String {
    format!("Kế hoạch đóng tiền kỳ {period} - {group}")
}

#[cfg(not(feature = "vi"))]
pub fn plan_title(group: impl std::fmt::Display, period: u32) -> String {
    format!("Contribution plan for period {period} of {group}")
}

#[cfg(feature = "vi")]
pub fn payout_title(group: impl std::fmt::Display, period: u32) -> String {
    format!("Tính tiền hốt kỳ {period} - {group}")
}

#[cfg(not(feature = "vi"))]
pub fn payout_title(group: impl std::fmt::Display, period: u32) -> String {
    format!("Payout for period {period} of {group}")
}

#[cfg(feature = "vi")]
pub fn settled(period: u32, winner: impl std::fmt::Display) -> String {
    format!("Đã ghi nhận hốt hụi kỳ {period} cho {winner}")
}

#[cfg(not(feature = "vi"))]
pub fn settled(period: u32, winner: impl std::fmt::Display) -> String {
    format!("Recorded period {period} settlement for {winner}")
}

#[cfg(feature = "vi")]
pub fn period_closed(group: impl std::fmt::Display, next_period: u32) -> String {
    format!("Dây {group} chuyển sang kỳ {next_period}")
}

#[cfg(not(feature = "vi"))]
pub fn period_closed(group: impl std::fmt::Display, next_period: u32) -> String {
    format!("Group {group} moved to period {next_period}")
}

#[cfg(feature = "vi")]
pub fn group_completed(group: impl std::fmt::Display) -> String {
    format!("Dây {group} đã mãn hụi")
}

#[cfg(not(feature = "vi"))]
pub fn group_completed(group: impl std::fmt::Display) -> String {
    format!("Group {group} has completed")
}

#[cfg(feature = "vi")]
pub fn payment_recorded(member: impl std::fmt::Display, remaining: impl std::fmt::Display) -> String {
    format!("Đã ghi nhận tiền đóng của {member}, còn thiếu {remaining} {CURRENCY}")
}

#[cfg(not(feature = "vi"))]
pub fn payment_recorded(member: impl std::fmt::Display, remaining: impl std::fmt::Display) -> String {
    format!("Recorded payment from {member}; {remaining} {CURRENCY} still due")
}

#[cfg(feature = "vi")]
pub fn member_saved(member: impl std::fmt::Display) -> String {
    format!("Đã lưu thành viên {member}")
}

#[cfg(not(feature = "vi"))]
pub fn member_saved(member: impl std::fmt::Display) -> String {
    format!("Saved member {member}")
}

#[cfg(feature = "vi")]
pub fn member_deleted(member: impl std::fmt::Display) -> String {
    format!("Đã xóa thành viên {member}")
}

#[cfg(not(feature = "vi"))]
pub fn member_deleted(member: impl std::fmt::Display) -> String {
    format!("Deleted member {member}")
}

#[cfg(feature = "vi")]
pub fn group_opened(group: impl std::fmt::Display, imported: usize) -> String {
    format!("Đã mở dây {group} ({imported} kỳ đã hốt được nhập)")
}

#[cfg(not(feature = "vi"))]
pub fn group_opened(group: impl std::fmt::Display, imported: usize) -> String {
    format!("Opened group {group} with {imported} imported settlement(s)")
}
