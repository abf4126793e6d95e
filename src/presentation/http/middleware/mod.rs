pub mod audit_context;
