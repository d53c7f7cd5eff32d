mod status_report;
