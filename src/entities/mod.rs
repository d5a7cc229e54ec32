//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod employee_profile;
pub mod expense_claim;
pub mod expense_item;
pub mod leave_request;
pub mod location_distance;
pub mod location_override;
pub mod monthly_target;
pub mod sales_order;
pub mod status;
pub mod system_setting;
pub mod visit_report;

pub use status::{ClaimStatus, HospitalType, ReviewStatus, TravelType};

// Re-export specific types to avoid conflicts
pub use employee_profile::{
    Column as EmployeeProfileColumn, Entity as EmployeeProfile, Model as EmployeeProfileModel,
};
pub use expense_claim::{
    Column as ExpenseClaimColumn, Entity as ExpenseClaim, Model as ExpenseClaimModel,
};
pub use expense_item::{
    Column as ExpenseItemColumn, Entity as ExpenseItem, Model as ExpenseItemModel,
};
pub use leave_request::{
    Column as LeaveRequestColumn, Entity as LeaveRequest, Model as LeaveRequestModel,
};
pub use location_distance::{
    Column as LocationDistanceColumn, Entity as LocationDistance, Model as LocationDistanceModel,
};
pub use location_override::{
    Column as LocationOverrideColumn, Entity as LocationOverride, Model as LocationOverrideModel,
};
pub use monthly_target::{
    Column as MonthlyTargetColumn, Entity as MonthlyTarget, Model as MonthlyTargetModel,
};
pub use sales_order::{Column as SalesOrderColumn, Entity as SalesOrder, Model as SalesOrderModel};
pub use system_setting::{
    Column as SystemSettingColumn, Entity as SystemSetting, Model as SystemSettingModel,
};
pub use visit_report::{
    Column as VisitReportColumn, Entity as VisitReport, Model as VisitReportModel,
};
