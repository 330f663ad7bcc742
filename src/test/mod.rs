//! Checks against brute-force linear scans over random point sets.
