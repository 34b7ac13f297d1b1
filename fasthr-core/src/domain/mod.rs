//! Core domain entities
//!
//! Plain data structures for the session and the HR records exchanged with
//! the API. No I/O happens here.

mod dashboard;
mod employee;
mod expense;
mod leave;
pub mod result;
mod session;
mod status;
mod user;

pub use dashboard::DashboardStats;
pub use employee::{EmployeeCard, EmployeeDetail};
pub use expense::{Expense, ExpenseSummary, ExpenseUpdate, NewExpense};
pub use leave::{LeaveBalance, LeaveRequest, LeaveUpdate, NewLeave};
pub use session::{AccessToken, Credentials, Session};
pub use status::RequestStatus;
pub use user::{Role, UserProfile};
