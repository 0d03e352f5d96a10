mod transcribe_flow_test;
