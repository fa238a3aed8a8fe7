mod mock_transport_tests;
