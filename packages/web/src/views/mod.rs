mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod payment;
pub use payment::Payment;

mod payment_success;
pub use payment_success::PaymentSuccess;

mod dashboard;
pub use dashboard::Dashboard;
