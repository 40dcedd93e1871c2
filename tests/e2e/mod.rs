// End-to-end tests for the Hack or Snooze client
//
// Each test gets its own in-process stub of the Hack or Snooze API (axum on an
// ephemeral port) and its own session file, so tests run in parallel without
// sharing state. The client under test talks to the stub over real HTTP.

mod helpers;
