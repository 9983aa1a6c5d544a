mod fixture;
mod mount_tests;
mod navigation_tests;
