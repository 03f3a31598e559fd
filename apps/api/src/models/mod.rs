pub mod recruiter;
